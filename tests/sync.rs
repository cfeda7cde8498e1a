mod common;

mod tests {
    use super::common::at;
    use myrtio_strip_sync::{ChannelId, SyncScheduler};

    #[test]
    fn test_disabled_scheduler_never_emits() {
        let mut sync = SyncScheduler::new(0);
        assert!(!sync.is_enabled());
        for ms in (0..20_000).step_by(100) {
            assert_eq!(sync.poll(at(ms)), None);
        }
    }

    #[test]
    fn test_sequence_after_interval() {
        let mut sync = SyncScheduler::new(3);
        assert_eq!(sync.poll(at(0)), None);
        assert_eq!(sync.poll(at(2_999)), None);

        assert_eq!(sync.poll(at(3_000)), Some(ChannelId::Red));
        assert_eq!(sync.poll(at(3_010)), None);
        assert_eq!(sync.poll(at(3_020)), Some(ChannelId::Green));
        assert_eq!(sync.poll(at(3_040)), Some(ChannelId::Blue));
        assert_eq!(sync.poll(at(3_060)), Some(ChannelId::White));
        assert_eq!(sync.cursor().next_step, Some(4));
        assert_eq!(sync.poll(at(3_080)), Some(ChannelId::Brightness));
        assert_eq!(sync.cursor().next_step, None);

        // The next interval counts from the end of the sequence
        assert_eq!(sync.poll(at(6_000)), None);
        assert_eq!(sync.poll(at(6_079)), None);
        assert_eq!(sync.poll(at(6_080)), Some(ChannelId::Red));
    }

    #[test]
    fn test_interval_change_keeps_running_sequence() {
        let mut sync = SyncScheduler::new(1);
        sync.poll(at(0));
        assert_eq!(sync.poll(at(1_000)), Some(ChannelId::Red));

        sync.set_interval(0);
        assert_eq!(sync.poll(at(1_020)), Some(ChannelId::Green));
        sync.poll(at(1_040));
        sync.poll(at(1_060));
        assert_eq!(sync.poll(at(1_080)), Some(ChannelId::Brightness));
        assert_eq!(sync.poll(at(60_000)), None);
    }
}
