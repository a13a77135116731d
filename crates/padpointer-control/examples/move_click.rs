use padpointer_control::{MouseButton, Performer};

fn parse_i32(value: Option<String>, name: &str) -> i32 {
    match value {
        Some(v) => match v.parse::<i32>() {
            Ok(num) => num,
            Err(_) => {
                eprintln!("Invalid {name} value '{v}'. Must be an integer.");
                std::process::exit(64);
            }
        },
        None => {
            eprintln!("Usage: move_click <x> <y>\nExample: move_click 640 400");
            std::process::exit(64);
        }
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let x = parse_i32(args.next(), "x");
    let y = parse_i32(args.next(), "y");

    let mut performer = match Performer::new() {
        Ok(p) => p,
        Err(err) => {
            eprintln!("Failed to initialize input performer: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = performer.move_to(x, y) {
        eprintln!("Failed to move pointer to ({x}, {y}): {err}");
        std::process::exit(1);
    }
    if let Err(err) = performer.click(MouseButton::Left) {
        eprintln!("Failed to click at ({x}, {y}): {err}");
        std::process::exit(1);
    }
}
