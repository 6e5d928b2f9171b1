
use support_service::{API_KEY, run_pagetest, spawn_service_or_skip};

fn compare_args(endpoint: &str, extra: &[&str]) -> Vec<String> {
    let mut args: Vec<String> = [
        "compare",
        "-u",
        "https://a.example/",
        "-u",
        "https://b.example/",
        "--runs",
        "2",
        "--api-key",
        API_KEY,
        "--poll-interval",
        "10ms",
        "--output-format",
        "json",
    ]
    .iter()
    .map(|arg| (*arg).to_owned())
    .collect();
    args.push("--endpoint".to_owned());
    args.push(format!("{}/runtest.php", endpoint));
    args.extend(extra.iter().map(|arg| (*arg).to_owned()));
    args
}

fn check_pairs(output: &std::process::Output) -> Result<(), String> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            stdout,
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    let value: serde_json::Value =
        serde_json::from_str(&stdout).map_err(|err| format!("invalid JSON: {}", err))?;
    let pairs = value
        .as_array()
        .ok_or_else(|| format!("Expected an array: {}", stdout))?;
    if pairs.len() != 2 {
        return Err(format!("Expected 2 pairs, got {}", pairs.len()));
    }
    for (index, pair) in pairs.iter().enumerate() {
        let first_url = pair.pointer("/first/url").and_then(serde_json::Value::as_str);
        let second_url = pair.pointer("/second/url").and_then(serde_json::Value::as_str);
        if first_url != Some("https://a.example/") || second_url != Some("https://b.example/") {
            return Err(format!("Unexpected urls in pair {}: {}", index, pair));
        }
    }
    let second_load = pairs
        .get(1)
        .and_then(|pair| pair.pointer("/second/load_time"))
        .and_then(serde_json::Value::as_str);
    if second_load != Some("1.700") {
        return Err(format!("Unexpected second page load time: {:?}", second_load));
    }
    Ok(())
}

#[test]
fn e2e_compare_sequential() -> Result<(), String> {
    let Some((endpoint, _server)) = spawn_service_or_skip()? else {
        return Ok(());
    };
    check_pairs(&run_pagetest(compare_args(&endpoint, &[]))?)
}

#[test]
fn e2e_compare_concurrent() -> Result<(), String> {
    let Some((endpoint, _server)) = spawn_service_or_skip()? else {
        return Ok(());
    };
    check_pairs(&run_pagetest(compare_args(&endpoint, &["--concurrent"]))?)
}

#[test]
fn e2e_compare_needs_two_urls() -> Result<(), String> {
    let args = [
        "compare",
        "-u",
        "https://a.example/",
        "--api-key",
        API_KEY,
        "--endpoint",
        "http://127.0.0.1:9/runtest.php",
    ];
    let output = run_pagetest(args)?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    if output.status.success() {
        return Err("Expected failure with a single URL".to_owned());
    }
    if !stderr.contains("CompareUrlCount") {
        return Err(format!("Expected CompareUrlCount in stderr: {}", stderr));
    }
    Ok(())
}
