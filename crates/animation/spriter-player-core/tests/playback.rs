use std::sync::Arc;

use spriter_player_core::{
    Animation, BoneTransform, Entity, Keyframe, KeyframePool, PlayerConfig, SpriterPlayer,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn mk_key(start: i64, end: i64, x: f32) -> Keyframe {
    Keyframe {
        start_time: start,
        end_time: end,
        bones: vec![BoneTransform {
            name: "root".into(),
            x,
            y: 0.0,
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }],
        objects: vec![],
    }
}

/// One animation "walk" whose keyframe `i` covers `[10i, 10(i+1))` with root x = `xs[i]`.
fn mk_player(xs: &[f32], frame_speed: i32) -> SpriterPlayer {
    let keys = xs
        .iter()
        .enumerate()
        .map(|(i, x)| mk_key(10 * i as i64, 10 * (i as i64 + 1), *x))
        .collect();
    let entity = Entity::new(
        "e",
        vec![Animation {
            id: 0,
            name: "walk".into(),
            length: 10 * xs.len() as i64,
        }],
    )
    .unwrap();
    SpriterPlayer::with_config(
        Arc::new(entity),
        Arc::new(KeyframePool::new(vec![keys])),
        PlayerConfig {
            frame_speed,
            ..PlayerConfig::default()
        },
    )
    .unwrap()
}

fn root_x(p: &SpriterPlayer) -> f32 {
    p.pose().bones[0].x
}

/// it should step from frame 0 to 5 inside key 0, then cross into key 1 at frame 10
#[test]
fn two_keys_speed_five() {
    let mut p = mk_player(&[0.0, 10.0], 5);
    assert_eq!((p.frame(), p.current_key()), (0, 0));
    approx(root_x(&p), 0.0, 1e-6);

    p.update(0.0, 0.0);
    assert_eq!((p.frame(), p.current_key()), (5, 0));
    approx(root_x(&p), 5.0, 1e-6);

    p.update(0.0, 0.0);
    assert_eq!((p.frame(), p.current_key()), (10, 1));
    approx(root_x(&p), 10.0, 1e-6);
}

/// it should visit every keyframe in order and wrap back to the first
#[test]
fn forward_visits_all_keys_and_wraps() {
    let mut p = mk_player(&[0.0, 10.0, 20.0], 5);
    let mut keys = Vec::new();
    let mut xs = Vec::new();
    for _ in 0..12 {
        p.update(0.0, 0.0);
        keys.push(p.current_key());
        xs.push(root_x(&p));
    }
    assert_eq!(keys, vec![0, 1, 1, 2, 2, 0, 0, 1, 1, 2, 2, 0]);
    let expected = [5.0, 10.0, 15.0, 20.0, 10.0, 0.0, 5.0, 10.0, 15.0, 20.0, 10.0, 0.0];
    for (x, e) in xs.iter().zip(expected) {
        approx(*x, e, 1e-5);
    }
}

/// it should play the same poses backwards, wrapping from the first key to the last
#[test]
fn reverse_visits_all_keys_backwards() {
    let mut p = mk_player(&[0.0, 10.0, 20.0], -5);
    assert_eq!(p.frame_speed(), -5);
    // keyframe 0, seen from the end of the wrap bracket
    assert_eq!((p.frame(), p.current_key()), (30, 0));
    approx(root_x(&p), 0.0, 1e-6);

    let mut keys = Vec::new();
    let mut xs = Vec::new();
    for _ in 0..7 {
        p.update(0.0, 0.0);
        keys.push(p.current_key());
        xs.push(root_x(&p));
    }
    assert_eq!(keys, vec![0, 2, 2, 1, 1, 0, 0]);
    let expected = [10.0, 20.0, 15.0, 10.0, 5.0, 0.0, 10.0];
    for (x, e) in xs.iter().zip(expected) {
        approx(*x, e, 1e-5);
    }
}

/// it should never show the same pose on two consecutive ticks in either direction
#[test]
fn no_repeated_pose_after_rewind() {
    for speed in [5, -5] {
        let mut p = mk_player(&[0.0, 10.0, 20.0, 30.0], speed);
        let mut prev = root_x(&p);
        for tick in 0..20 {
            p.update(0.0, 0.0);
            let x = root_x(&p);
            assert!((x - prev).abs() > 1e-3, "speed {speed} tick {tick}: stuck at {x}");
            prev = x;
        }
    }
}

/// it should never double-count a keyframe: crossings always step by exactly one
#[test]
fn crossings_step_by_one_both_directions() {
    for speed in [1, 3, 7, 10, -1, -4, -10] {
        let mut p = mk_player(&[0.0, 1.0, 2.0, 3.0], 10);
        p.set_frame_speed(speed);
        let n = p.keyframes().len();
        let mut prev = p.current_key();
        let mut crossings = 0;
        for _ in 0..200 {
            p.update(0.0, 0.0);
            let key = p.current_key();
            assert!(key < n);
            if key != prev {
                let expected = if speed > 0 {
                    (prev + 1) % n
                } else {
                    (prev + n - 1) % n
                };
                assert_eq!(key, expected, "speed {speed}");
                crossings += 1;
            }
            prev = key;
        }
        // each 10-unit key takes ceil(10 / |speed|) ticks
        let s = speed.unsigned_abs() as usize;
        let ticks_per_key = (10 + s - 1) / s;
        assert!(crossings >= 200 / ticks_per_key, "speed {speed}: {crossings}");
    }
}

/// it should keep the same pose pair when the direction flips mid-interval
#[test]
fn direction_flip_is_continuous() {
    let mut p = mk_player(&[0.0, 10.0, 20.0], 5);
    p.update(0.0, 0.0);
    p.update(0.0, 0.0);
    p.update(0.0, 0.0); // frame 15 in key 1
    approx(root_x(&p), 15.0, 1e-6);

    p.set_frame_speed(-5);
    p.update(0.0, 0.0);
    approx(root_x(&p), 10.0, 1e-6);
    p.update(0.0, 0.0);
    approx(root_x(&p), 5.0, 1e-6);
}

/// it should hold a single keyframe in either direction
#[test]
fn single_keyframe_holds() {
    for speed in [3, -3] {
        let mut p = mk_player(&[42.0], speed);
        for _ in 0..10 {
            p.update(0.0, 0.0);
            assert_eq!(p.current_key(), 0);
            approx(root_x(&p), 42.0, 1e-6);
        }
    }
}

/// it should not move with zero speed
#[test]
fn zero_speed_is_paused() {
    let mut p = mk_player(&[0.0, 10.0], 0);
    for _ in 0..5 {
        p.update(0.0, 0.0);
    }
    assert_eq!((p.frame(), p.current_key()), (0, 0));
}
