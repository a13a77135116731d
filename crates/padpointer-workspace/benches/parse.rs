use codspeed_criterion_compat::{black_box, criterion_group, criterion_main, Criterion};
use padpointer_workspace::parse_settings;

const SETTINGS: &str = r#"
version: 1
frame_interval_ms: 16
pointer:
  cursor_speed: 8
  deadzone: 0.01
  click_delay_ms: 50
scroll:
  dpad_step_px: 200
  stick_multiplier: 20
  stick_threshold: 0.1
viewport:
  width: 1920
  height: 1080
feedback:
  rumble_ms: 40
"#;

fn bench_parse_settings(c: &mut Criterion) {
    c.bench_function("workspace_parse_settings", |b| {
        b.iter(|| {
            let input = black_box(SETTINGS);
            let settings = parse_settings(input).expect("settings should parse");
            black_box(settings);
        })
    });
}

criterion_group!(benches, bench_parse_settings);
criterion_main!(benches);
