//! The demo capability.

use serde::{Deserialize, Serialize};

use crate::error::DemoResult;

/// Size of the surface a demo renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport of the given size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    /// 1200 x 900, a 4:3 surface.
    fn default() -> Self {
        Self::new(1200, 900)
    }
}

/// An externally supplied demo that can be started and stopped.
///
/// Both operations are synchronous: when they return, the demo has fully
/// started or fully released its resources, so either may block. Callers on
/// an async runtime should keep them off the reactor. Implementations must
/// tolerate `stop` followed by `run` any number of times.
pub trait Demo: Send {
    /// Begin (or resume) rendering into a surface of the given size.
    ///
    /// # Errors
    ///
    /// Returns an error if the demo could not be started.
    fn run(&mut self, viewport: Viewport) -> DemoResult<()>;

    /// Halt the demo and release any per-demo resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the demo could not be stopped cleanly.
    fn stop(&mut self) -> DemoResult<()>;
}

impl<D: Demo + ?Sized> Demo for Box<D> {
    fn run(&mut self, viewport: Viewport) -> DemoResult<()> {
        (**self).run(viewport)
    }

    fn stop(&mut self) -> DemoResult<()> {
        (**self).stop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport_is_four_by_three() {
        let v = Viewport::default();
        assert_eq!(v, Viewport::new(1200, 900));
        assert_eq!(v.width.checked_mul(3), v.height.checked_mul(4));
    }

    #[test]
    fn test_boxed_demo_forwards() {
        struct Counter(u32, u32);
        impl Demo for Counter {
            fn run(&mut self, _: Viewport) -> DemoResult<()> {
                self.0 = self.0.saturating_add(1);
                Ok(())
            }
            fn stop(&mut self) -> DemoResult<()> {
                self.1 = self.1.saturating_add(1);
                Ok(())
            }
        }

        let mut boxed: Box<Counter> = Box::new(Counter(0, 0));
        boxed.run(Viewport::default()).unwrap();
        boxed.stop().unwrap();
        boxed.run(Viewport::default()).unwrap();
        assert_eq!((boxed.0, boxed.1), (2, 1));
    }
}
