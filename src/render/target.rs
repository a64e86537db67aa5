//! Draw Targets
//!
//! The container a renderer mounts its chart into. Each renderer owns its
//! own target, so two charts on one page never overwrite each other.

use super::error::RenderResult;

/// A display surface holding at most one chart
pub trait DrawTarget {
    /// Stable id of the container (e.g. `bar-chart`)
    fn id(&self) -> &str;

    /// Remove whatever is currently shown
    fn clear(&mut self) -> RenderResult<()>;

    /// Show `markup`, replacing previous content
    fn mount(&mut self, markup: &str) -> RenderResult<()>;
}

/// In-memory target that keeps the last mounted markup
#[derive(Debug, Clone, Default)]
pub struct SvgBuffer {
    id: String,
    content: String,
    mounts: usize,
}

impl SvgBuffer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: String::new(),
            mounts: 0,
        }
    }

    pub fn contents(&self) -> &str {
        &self.content
    }

    pub fn into_contents(self) -> String {
        self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of times anything was mounted
    pub fn mount_count(&self) -> usize {
        self.mounts
    }
}

impl DrawTarget for SvgBuffer {
    fn id(&self) -> &str {
        &self.id
    }

    fn clear(&mut self) -> RenderResult<()> {
        self.content.clear();
        Ok(())
    }

    fn mount(&mut self, markup: &str) -> RenderResult<()> {
        self.content.clear();
        self.content.push_str(markup);
        self.mounts += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_replaces() {
        let mut buffer = SvgBuffer::new("bar-chart");
        buffer.mount("<svg>a</svg>").unwrap();
        buffer.mount("<svg>b</svg>").unwrap();

        assert_eq!(buffer.id(), "bar-chart");
        assert_eq!(buffer.contents(), "<svg>b</svg>");
        assert_eq!(buffer.mount_count(), 2);

        buffer.clear().unwrap();
        assert!(buffer.is_empty());
    }
}
