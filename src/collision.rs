//! Axis-aligned rectangle primitive shared by every collision check in the game.
//!
//! Coordinates are integer screen/world pixels with the origin at the top-left and `y` growing
//! downward, so a rectangle's "bottom" is `y + h`. Intersection is half-open: rectangles that
//! only share an edge do not collide.

use crate::entities::Obstacle;

/// Integer rectangle: top-left corner plus width and height. Used for the character, obstacles,
/// enemies, nets, the door and every drawable the HUD hands to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Hitbox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Hitbox {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge, `x + w`.
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive bottom edge, `y + h`. Larger values are lower on screen.
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Horizontal midpoint, rounded toward the left edge for odd widths.
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Vertical midpoint, rounded toward the top edge for odd heights.
    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Degenerate rectangles never collide with anything, themselves included.
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Same rectangle moved horizontally by `dx`.
    pub fn shifted_x(&self, dx: i32) -> Hitbox {
        Hitbox {
            x: self.x + dx,
            ..*self
        }
    }
}

/// True iff `a` and `b` overlap with non-zero area.
pub fn intersects(a: &Hitbox, b: &Hitbox) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    let left = a.x.max(b.x);
    let right = a.right().min(b.right());
    if right <= left {
        return false;
    }

    let top = a.y.max(b.y);
    let bottom = a.bottom().min(b.bottom());
    bottom > top
}

/// Iterator over solid obstacles overlapping `hitbox`, in level order.
pub fn solid_hits<'a>(
    hitbox: &'a Hitbox,
    obstacles: &'a [Obstacle],
) -> impl Iterator<Item = &'a Obstacle> + 'a {
    obstacles
        .iter()
        .filter(move |obstacle| obstacle.solid && intersects(hitbox, &obstacle.hitbox))
}

/// Whether any solid obstacle overlaps `hitbox`. Used for the headroom check before standing up.
pub fn overlaps_any_solid(hitbox: &Hitbox, obstacles: &[Obstacle]) -> bool {
    solid_hits(hitbox, obstacles).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_collide_both_ways() {
        let a = Hitbox::new(0, 0, 50, 100);
        let b = Hitbox::new(40, 90, 30, 30);
        assert!(intersects(&a, &b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Hitbox::new(0, 0, 50, 50);
        let right = Hitbox::new(50, 0, 50, 50);
        let below = Hitbox::new(0, 50, 50, 50);
        assert!(!intersects(&a, &right));
        assert!(!intersects(&a, &below));
        assert!(!intersects(&below, &a));
    }

    #[test]
    fn disjoint_rects_do_not_collide() {
        let a = Hitbox::new(0, 0, 10, 10);
        let b = Hitbox::new(100, 100, 10, 10);
        assert!(!intersects(&a, &b));
        assert!(!intersects(&b, &a));
    }

    #[test]
    fn rect_intersects_itself_unless_degenerate() {
        let a = Hitbox::new(3, -7, 12, 4);
        assert!(intersects(&a, &a));

        let flat = Hitbox::new(3, -7, 12, 0);
        assert!(!intersects(&flat, &flat));
    }

    #[test]
    fn containment_counts_as_collision() {
        let outer = Hitbox::new(0, 0, 100, 100);
        let inner = Hitbox::new(10, 10, 5, 5);
        assert!(intersects(&outer, &inner));
        assert!(intersects(&inner, &outer));
    }

    #[test]
    fn only_solid_obstacles_are_reported() {
        let obstacles = [
            Obstacle::new(Hitbox::new(0, 0, 10, 10), false, false),
            Obstacle::new(Hitbox::new(5, 5, 10, 10), true, true),
        ];
        let probe = Hitbox::new(0, 0, 20, 20);
        let hits: Vec<_> = solid_hits(&probe, &obstacles).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].hitbox.x, 5);
        assert!(overlaps_any_solid(&probe, &obstacles));
    }
}
