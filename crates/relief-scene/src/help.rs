//! Keyboard command reference for the interactive viewer.

use std::io::{self, Write};

/// Printed verbatim before an interactive session.
pub const KEYBOARD_COMMANDS: &str = "
    a: Toggles rotational animation mode.
    c: Toggles backface culling.
    f: Toggles fullscreen mode.
    h: Toggles shadow rendering.
    i: Toggles axis display mode (no axes, world axis, mesh axes, all axes).
    l: Toggles lighting mode (scene lighting, Raymond lighting, or direct lighting).
    m: Toggles face normal visualization.
    n: Toggles vertex normal visualization.
    o: Toggles orthographic mode.
    q: Quits the viewer.
    r: Starts recording a GIF, and pressing again stops recording and opens a file dialog.
    s: Opens a file dialog to save the current view as an image.
    w: Toggles wireframe mode (scene default, flip wireframes, all wireframe, or all solid).
    z: Resets the camera to the initial view.
    ";

/// Writes the keyboard reference to `out`.
pub fn write_keyboard_commands(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{KEYBOARD_COMMANDS}")
}

/// Prints the keyboard reference to stdout.
pub fn print_keyboard_commands() {
    println!("{KEYBOARD_COMMANDS}");
}
