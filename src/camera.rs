//! Horizontal camera for scrolling phases. The camera is a single x offset in world pixels; the
//! render side subtracts it from world rectangles to get screen rectangles.

use crate::collision::Hitbox;
use crate::config::WINDOW_WIDTH;
use crate::level::Level;

/// Centres the view on the character, clamped so the view never leaves the level. Levels that
/// don't scroll always get offset zero.
pub fn follow(target: &Hitbox, level: &Level) -> i32 {
    if !level.scrolls() {
        return 0;
    }

    let desired = target.center_x() - WINDOW_WIDTH / 2;
    desired.clamp(0, level.width - WINDOW_WIDTH)
}

/// World rectangle as seen through a camera at `camera_x`.
pub fn to_screen(world: &Hitbox, camera_x: i32) -> Hitbox {
    world.shifted_x(-camera_x)
}
