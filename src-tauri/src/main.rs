#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    storytime_shell_lib::run();
}
