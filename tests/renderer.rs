mod common;

mod tests {
    use super::common::{MockDriver, at};
    use myrtio_strip_sync::{ChannelValues, StripRenderer};

    #[test]
    fn test_updates_within_window_coalesce() {
        let mut driver = MockDriver::default();
        let mut renderer = StripRenderer::new(ChannelValues::OFF);

        renderer.set(ChannelValues::new(1, 0, 0, 0, 255));
        assert!(renderer.flush(at(0), &mut driver));
        assert_eq!(driver.commits.len(), 1);

        for (offset, red) in (1..=10).zip(10..) {
            renderer.set(ChannelValues::new(red, 0, 0, 0, 255));
            assert!(!renderer.flush(at(offset), &mut driver));
        }
        assert_eq!(driver.commits.len(), 1);
        assert!(renderer.is_dirty());

        // The deferred update goes out once the window elapses, with no new update
        assert!(renderer.flush(at(16), &mut driver));
        assert_eq!(driver.commits.len(), 2);
        assert_eq!(driver.last_commit(), Some([19, 0, 0, 0, 255]));

        assert!(!renderer.flush(at(40), &mut driver));
        assert_eq!(driver.commits.len(), 2);
    }

    #[test]
    fn test_unchanged_values_do_not_mark_dirty() {
        let mut renderer = StripRenderer::new(ChannelValues::OFF);
        renderer.set(ChannelValues::OFF);
        assert!(!renderer.is_dirty());
    }

    #[test]
    fn test_white_is_gamma_corrected() {
        let mut driver = MockDriver::default();
        let mut renderer = StripRenderer::new(ChannelValues::OFF);

        renderer.set(ChannelValues::new(128, 0, 0, 255, 255));
        renderer.flush(at(0), &mut driver);
        assert_eq!(driver.last_commit(), Some([128, 0, 0, 255, 255]));

        renderer.set(ChannelValues::new(128, 0, 0, 128, 255));
        renderer.flush(at(100), &mut driver);
        let [_, _, _, white, _] = driver.last_commit().unwrap();
        assert!(white < 128);
        assert_eq!(renderer.committed().white, 128);
    }

    #[test]
    fn test_discard_pending_restores_committed() {
        let mut driver = MockDriver::default();
        let mut renderer = StripRenderer::new(ChannelValues::OFF);
        let shown = ChannelValues::new(10, 20, 30, 40, 50);

        renderer.set(shown);
        renderer.flush(at(0), &mut driver);
        renderer.set(ChannelValues::new(99, 99, 99, 99, 99));
        renderer.discard_pending();

        assert_eq!(renderer.values(), shown);
        assert!(!renderer.is_dirty());
        assert!(!renderer.flush(at(100), &mut driver));
    }
}
