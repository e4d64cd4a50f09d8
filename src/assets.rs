//! Asset readiness gate
//!
//! The first animation frame is requested only after the player image has
//! decoded and the obstacle video can play.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    PlayerImage,
    ObstacleVideo,
}

#[derive(Debug, Clone, Default)]
pub struct AssetGate {
    image_ready: bool,
    video_ready: bool,
    opened: bool,
}

impl AssetGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a readiness signal. Returns true exactly once, on the call
    /// that makes both assets ready.
    pub fn mark_ready(&mut self, asset: Asset) -> bool {
        match asset {
            Asset::PlayerImage => self.image_ready = true,
            Asset::ObstacleVideo => self.video_ready = true,
        }

        if self.opened || !self.is_ready() {
            return false;
        }
        self.opened = true;
        log::info!("All assets ready");
        true
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.image_ready && self.video_ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opens_after_both() {
        let mut gate = AssetGate::new();
        assert!(!gate.mark_ready(Asset::ObstacleVideo));
        assert!(!gate.is_ready());
        assert!(gate.mark_ready(Asset::PlayerImage));
        assert!(gate.is_ready());
    }

    #[test]
    fn test_opens_only_once() {
        let mut gate = AssetGate::new();
        gate.mark_ready(Asset::PlayerImage);
        assert!(gate.mark_ready(Asset::ObstacleVideo));
        // Video elements fire canplay again after seeking
        assert!(!gate.mark_ready(Asset::ObstacleVideo));
        assert!(!gate.mark_ready(Asset::PlayerImage));
    }
}
