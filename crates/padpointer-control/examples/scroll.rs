use padpointer_control::Performer;

fn main() {
    // Usage: scroll <y>
    let y = match std::env::args().nth(1).map(|v| v.parse::<i32>()) {
        Some(Ok(y)) if y != 0 => y,
        _ => {
            eprintln!("Usage: scroll <y>\nExample: scroll -3  # scroll up 3 steps");
            std::process::exit(64);
        }
    };

    let mut performer = match Performer::new() {
        Ok(p) => p,
        Err(err) => {
            eprintln!("Failed to initialize input performer: {err}");
            std::process::exit(1);
        }
    };

    match performer.display_size() {
        Ok((w, h)) => println!("main display: {w}x{h}"),
        Err(err) => eprintln!("Failed to read display size: {err}"),
    }

    if let Err(err) = performer.scroll_y(y) {
        eprintln!("Failed to scroll vertically by {y}: {err}");
        std::process::exit(1);
    }
}
