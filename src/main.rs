mod entry;
mod logger;

use pagetest::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
