//! Crate docs are inline comments too.

use std::fmt;

/// Doc comment with a third slash.
pub struct Point {
    pub x: i32, // trailing
}

impl fmt::Display for Point {
    /* block
     * style */
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.x)
    }
}
