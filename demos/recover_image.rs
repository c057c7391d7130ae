//! Recover an image from a white overlay at 50% alpha.
//!
//! Usage:
//! ```sh
//! cargo run --example recover_image -- composite.webp mask.webp output.webp
//! ```

use std::env;
use std::process;

use overlay_unblend::{BlendParams, UnblendEngine};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <composite> <mask> <output>", args[0]);
        process::exit(1);
    }

    let params = BlendParams::new(0.5, [255, 255, 255]).expect("valid blend parameters");
    let engine = UnblendEngine::new(params);
    let result = engine.process_files(args[1].as_ref(), args[2].as_ref(), args[3].as_ref());

    if result.success {
        println!("Done: {}", result.message);
    } else {
        eprintln!("Error: {}", result.message);
        process::exit(1);
    }
}
