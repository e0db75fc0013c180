use counter::{CounterFrom, app, counter_label};
use hindsight_core::Role;
use hindsight_platform::{Headless, HeadlessConfig, run_headless_app};

fn first_line(app: &mut Headless) -> String {
    app.text()
        .unwrap()
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

#[test]
fn first_render_shows_undefined() {
    let mut ui = Headless::new(app);
    assert_eq!(first_line(&mut ui), "Counter Value : 0 || Old Value : undefined");
}

#[test]
fn increment_once() {
    let mut ui = Headless::new(app);
    ui.click("Increment").unwrap();
    assert_eq!(first_line(&mut ui), "Counter Value : 1 || Old Value : 0");
}

#[test]
fn decrement_once() {
    let mut ui = Headless::new(app);
    ui.click("Decrement").unwrap();
    assert_eq!(first_line(&mut ui), "Counter Value : -1 || Old Value : 0");
}

#[test]
fn three_increments() {
    let mut ui = Headless::new(app);
    for _ in 0..3 {
        ui.click("Increment").unwrap();
    }
    assert_eq!(first_line(&mut ui), "Counter Value : 3 || Old Value : 2");
}

#[test]
fn previous_is_value_one_action_ago() {
    // Small LCG so the sequences are varied but reproducible.
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..20 {
        let mut ui = Headless::new(app);
        ui.frame().unwrap();
        let mut count = 0i32;
        for _ in 0..25 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let before = count;
            if (seed >> 16) & 1 == 0 {
                ui.click("Increment").unwrap();
                count += 1;
            } else {
                ui.click("Decrement").unwrap();
                count -= 1;
            }
            assert_eq!(first_line(&mut ui), counter_label(count, Some(before)));
        }
    }
}

#[test]
fn increment_wraps_at_max() {
    let mut ui = Headless::new(|_| CounterFrom(i32::MAX));
    ui.click("Increment").unwrap();
    assert_eq!(
        first_line(&mut ui),
        "Counter Value : -2147483648 || Old Value : 2147483647"
    );
}

#[test]
fn decrement_wraps_at_min() {
    let mut ui = Headless::new(|_| CounterFrom(i32::MIN));
    ui.click("Decrement").unwrap();
    assert_eq!(
        first_line(&mut ui),
        "Counter Value : 2147483647 || Old Value : -2147483648"
    );
}

#[test]
fn repeated_renders_are_idempotent() {
    let mut ui = Headless::new(app);
    ui.click("Increment").unwrap();
    ui.click("Increment").unwrap();

    let text = ui.text().unwrap();
    let frames = ui.frames_rendered();
    for _ in 0..5 {
        assert_eq!(ui.text().unwrap(), text);
    }
    assert_eq!(ui.frames_rendered(), frames);
    assert_eq!(first_line(&mut ui), "Counter Value : 2 || Old Value : 1");
}

#[test]
fn buttons_render_below_values() {
    let mut ui = Headless::new(app);
    assert_eq!(
        ui.text().unwrap(),
        "Counter Value : 0 || Old Value : undefined\n[Increment] [Decrement]"
    );
    let frame = ui.frame().unwrap();
    let buttons: Vec<(String, usize)> = frame
        .semantics_nodes
        .iter()
        .filter(|n| n.role == Role::Button)
        .filter_map(|n| Some((n.label.clone()?, n.line)))
        .collect();
    assert_eq!(
        buttons,
        vec![("Increment".to_string(), 1), ("Decrement".to_string(), 1)]
    );
    let text = &frame.semantics_nodes[0];
    assert_eq!((text.role, text.line), (Role::Text, 0));
}

#[test]
fn remount_starts_fresh() {
    let mut ui = Headless::new(app);
    ui.click("Increment").unwrap();
    ui.unmount();
    assert!(!ui.is_mounted());

    let mut again = Headless::new(app);
    assert_eq!(first_line(&mut again), "Counter Value : 0 || Old Value : undefined");
}

#[test]
fn instances_do_not_share_state() {
    let mut a = Headless::new(app);
    let mut b = Headless::new(app);
    a.click("Increment").unwrap();
    a.click("Increment").unwrap();
    b.click("Decrement").unwrap();
    assert_eq!(first_line(&mut a), "Counter Value : 2 || Old Value : 1");
    assert_eq!(first_line(&mut b), "Counter Value : -1 || Old Value : 0");
}

#[test]
fn scripted_session() {
    let input = "Increment\nIncrement\nDecrement\nquit\n".as_bytes();
    let mut out = Vec::new();
    let config = HeadlessConfig {
        separator: None,
        ..HeadlessConfig::default()
    };
    run_headless_app(app, input, &mut out, config).unwrap();
    let values: Vec<String> = String::from_utf8(out)
        .unwrap()
        .lines()
        .filter(|l| l.starts_with("Counter"))
        .map(str::to_string)
        .collect();
    assert_eq!(
        values,
        vec![
            "Counter Value : 0 || Old Value : undefined",
            "Counter Value : 1 || Old Value : 0",
            "Counter Value : 2 || Old Value : 1",
            "Counter Value : 1 || Old Value : 2",
        ]
    );
}

#[test]
fn label_formatting() {
    assert_eq!(counter_label(5, None), "Counter Value : 5 || Old Value : undefined");
    assert_eq!(counter_label(-3, Some(-2)), "Counter Value : -3 || Old Value : -2");
}
