/// Entry point for the reset tool. This file should be kept as light as possible.
fn main() {
    chives_reset::run()
}
