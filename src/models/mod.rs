pub mod candidate;
pub mod finding;
pub mod loaders;
pub mod term;

pub use candidate::TextCandidate;
pub use finding::{Finding, Issue};
pub use loaders::{load_marks, load_urls};
pub use term::{MatchPolicy, TermDefinition};
