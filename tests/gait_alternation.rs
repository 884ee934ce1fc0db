use approx::assert_abs_diff_eq;
use minikame::core::trace::{Trace, side_at};
use minikame::gait::{GaitDriver, GaitSide, LegId, SIDE_BUCKET};

#[test]
fn side_flips_every_bucket() {
    for k in 0..8 {
        let start = k as f64 * SIDE_BUCKET;
        let expected = (k % 2) as u8;
        assert_eq!(side_at(start, SIDE_BUCKET), expected);
        assert_eq!(side_at(start + SIDE_BUCKET - 0.5, SIDE_BUCKET), expected);
        assert_eq!(GaitSide::at(start).index(), expected);
    }
}

#[test]
fn diagonal_pairs_share_a_side() {
    assert_eq!(GaitSide::of_leg(LegId::FrontLeft), GaitSide::of_leg(LegId::BackRight));
    assert_eq!(GaitSide::of_leg(LegId::FrontRight), GaitSide::of_leg(LegId::BackLeft));
    assert_ne!(GaitSide::of_leg(LegId::FrontLeft), GaitSide::of_leg(LegId::FrontRight));
}

#[test]
fn idle_pair_holds_its_last_command() {
    let mut driver = GaitDriver::default();
    let mut held = None;
    let mut t = 0.0;
    while t < 2.0 * SIDE_BUCKET {
        let frame = driver.step(t);
        let active = frame.side;
        for id in LegId::ALL {
            let leg_osc = driver.oscillators().get(id).leg;
            let command = frame.leg(id).leg_command();
            if active.drives(id) {
                assert_abs_diff_eq!(command, leg_osc.value_at(t), epsilon = 1e-12);
            }
        }
        let front_left = frame.leg(LegId::FrontLeft).leg_command();
        if active == GaitSide::FrontLeftBackRight {
            held = Some(front_left);
        } else {
            assert_eq!(Some(front_left), held);
        }
        t += 10.0;
    }
}

#[test]
fn braces_follow_oscillators_every_frame() {
    let mut driver = GaitDriver::default();
    for step in 0..200 {
        let t = step as f64 * 7.0;
        let frame = driver.step(t);
        for id in LegId::ALL {
            let raw = driver.oscillators().get(id).brace.value_at(t);
            assert_abs_diff_eq!(
                frame.leg(id).brace_rotation(),
                raw.clamp(-0.5, 0.4),
                epsilon = 1e-12
            );
        }
    }
}

#[test]
fn gated_leg_trace_reads_zero_off_side() {
    let driver = GaitDriver::default();
    let id = LegId::FrontRight;
    let gate = GaitSide::of_leg(id).gate();
    let trace = Trace::sample(&driver.oscillators().get(id).leg, 0.0, 1000, Some(gate));
    assert!(trace.samples[..500].iter().all(|v| *v == 0.0));
    assert!(trace.samples[500..].iter().any(|v| *v != 0.0));
    assert_eq!(trace.head, None);
}
