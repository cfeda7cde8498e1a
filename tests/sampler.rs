mod common;

mod tests {
    use super::common::{MockAdc, at};
    use myrtio_strip_sync::sampler::Reading;
    use myrtio_strip_sync::{AnalogSampler, ChannelId, ChannelValues};

    fn red(level: u8) -> Reading {
        Reading {
            channel: ChannelId::Red,
            level,
        }
    }

    /// Poll until one full round of readings was taken
    fn round(sampler: &mut AnalogSampler, adc: &mut MockAdc) -> bool {
        (0..4).fold(false, |changed, _| sampler.poll(adc) || changed)
    }

    #[test]
    fn test_pipeline_selects_before_reading() {
        let mut adc = MockAdc::with_levels([10, 20, 30, 40]);
        let mut sampler = AnalogSampler::new();

        assert_eq!(sampler.step(&mut adc), None);
        assert_eq!(adc.selects, vec![0]);
        assert_eq!(adc.reads, 0);

        let readings: Vec<_> = (0..5).filter_map(|_| sampler.step(&mut adc)).collect();
        let levels: Vec<_> = readings.iter().map(|reading| reading.level).collect();
        assert_eq!(levels, vec![10, 20, 30, 40, 10]);
        assert_eq!(readings[3].channel, ChannelId::White);
        assert_eq!(adc.selects, vec![0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_hysteresis() {
        let mut sampler = AnalogSampler::new();
        assert!(!sampler.accept(red(1)));
        assert!(sampler.accept(red(2)));
        assert!(!sampler.accept(red(3)));
        assert!(!sampler.accept(red(1)));
        assert!(sampler.accept(red(0)));
        assert!(sampler.accept(red(255)));
        assert!(!sampler.accept(red(254)));
    }

    #[test]
    fn test_jitter_within_band_is_ignored() {
        let mut adc = MockAdc::with_levels([100, 100, 100, 100]);
        let mut sampler = AnalogSampler::new();
        sampler.seed(&ChannelValues::new(100, 100, 100, 100, 255));
        sampler.poll(&mut adc);

        for (ms, level) in [(0, 101), (10, 99), (20, 100), (30, 101)] {
            adc.set_level(0, level);
            assert!(!round(&mut sampler, &mut adc));
            assert_eq!(sampler.take_changes(at(ms)), None);
        }
    }

    #[test]
    fn test_change_renders_after_full_round() {
        let mut adc = MockAdc::with_levels([0, 0, 0, 0]);
        let mut sampler = AnalogSampler::new();
        sampler.poll(&mut adc);

        adc.set_level(1, 50);
        assert!(!sampler.poll(&mut adc));
        assert!(!sampler.poll(&mut adc));
        // Nothing is broadcast before the round completes
        assert_eq!(sampler.take_changes(at(0)), None);
        assert!(!sampler.poll(&mut adc));
        assert!(sampler.poll(&mut adc));

        let values = sampler.apply_to(ChannelValues::OFF.with_brightness(255));
        assert_eq!(values, ChannelValues::new(0, 50, 0, 0, 255));
        let changed = sampler.take_changes(at(0)).unwrap();
        assert_eq!(changed.as_slice(), &[ChannelId::Green]);
    }

    #[test]
    fn test_broadcast_is_rate_limited() {
        let mut adc = MockAdc::with_levels([0, 0, 0, 0]);
        let mut sampler = AnalogSampler::new();
        sampler.poll(&mut adc);

        adc.set_level(0, 10);
        round(&mut sampler, &mut adc);
        assert!(sampler.take_changes(at(100)).is_some());

        adc.set_level(2, 10);
        round(&mut sampler, &mut adc);
        assert_eq!(sampler.take_changes(at(120)), None);
        adc.set_level(3, 10);
        round(&mut sampler, &mut adc);
        assert_eq!(sampler.take_changes(at(149)), None);

        let changed = sampler.take_changes(at(150)).unwrap();
        assert_eq!(changed.as_slice(), &[ChannelId::Blue, ChannelId::White]);
        assert_eq!(sampler.take_changes(at(300)), None);
    }
}
