//! Remote collaborators: the design document source and the qualitative
//! comparator, behind the traits in [`traits`].

pub mod anthropic;
pub mod comparison;
pub mod figma;
pub mod http_client;
pub mod scrub;
pub mod traits;

pub use anthropic::AnthropicComparator;
pub use figma::{CommentAnchor, FigmaClient};
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::{BoxFuture, Comparator, Comparison, DocumentSource};
