pub mod prominent_text;
pub mod rate_limiter;
pub mod report_writer;
pub mod screenshot_writer;
pub mod symbol_matcher;

pub use prominent_text::ProminentTextExtractor;
pub use rate_limiter::RateLimiter;
pub use report_writer::{ReportPaths, ReportWriter};
pub use screenshot_writer::ScreenshotWriter;
pub use symbol_matcher::{MatchOutcome, SymbolMatcher};
