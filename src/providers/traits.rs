use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::design::{Confidence, DesignProfile, Deviation, TreeNode};
use crate::error::Result;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Where design documents come from.
pub trait DocumentSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the full document tree for `file_key`.
    ///
    /// Fails with `EvalError::UpstreamFetch` on transport errors, non-success
    /// statuses and payloads without a document root.
    fn fetch_document<'a>(&'a self, file_key: &'a str) -> BoxFuture<'a, Result<TreeNode>>;
}

/// What the qualitative comparator returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    #[serde(default)]
    pub deviations: Vec<Deviation>,
    #[serde(default)]
    pub overall_assessment: String,
    #[serde(default, rename = "comparison_confidence")]
    pub confidence: Confidence,
}

/// Produces qualitative deviations between two profiles.
pub trait Comparator: Send + Sync {
    fn name(&self) -> &str;

    /// Fails with `EvalError::Comparator` when no usable answer comes back.
    fn compare<'a>(
        &'a self,
        reference: &'a DesignProfile,
        candidate: &'a DesignProfile,
    ) -> BoxFuture<'a, Result<Comparison>>;
}
