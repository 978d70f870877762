use crate::gallery::ImageRef;

/// What one viewing round did
#[derive(Debug, Clone, PartialEq)]
pub enum CommentOutcome {
    /// The latest image already has a reaction from this audience member
    Skipped { image: ImageRef },
    /// A new reaction was generated and appended
    Recorded { image: ImageRef, text: String },
}

impl CommentOutcome {
    pub fn image(&self) -> &ImageRef {
        match self {
            CommentOutcome::Skipped { image } | CommentOutcome::Recorded { image, .. } => image,
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self, CommentOutcome::Recorded { .. })
    }
}
