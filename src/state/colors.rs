use crate::error::ColorError;
use crate::types::Color;
use rand::Rng;

/// Finite pool of display colors handed out to participants
#[derive(Debug)]
pub struct ColorAllocator {
    palette: Vec<Color>,
    /// Unassigned colors, never containing duplicates
    available: Vec<Color>,
}

impl ColorAllocator {
    /// Build an allocator over `palette`. Duplicate entries are dropped, first occurrence wins.
    pub fn new<I, S>(palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Color>,
    {
        let mut unique: Vec<Color> = Vec::new();
        for color in palette {
            let color = color.into();
            if !unique.contains(&color) {
                unique.push(color);
            }
        }

        Self {
            available: unique.clone(),
            palette: unique,
        }
    }

    /// Take a uniformly random unassigned color
    pub fn allocate(&mut self) -> Result<Color, ColorError> {
        self.allocate_with(&mut rand::rng())
    }

    pub fn allocate_with<R: Rng>(&mut self, rng: &mut R) -> Result<Color, ColorError> {
        if self.available.is_empty() {
            return Err(ColorError::Exhausted);
        }
        let index = rng.random_range(0..self.available.len());
        Ok(self.available.swap_remove(index))
    }

    /// Return an assigned color to the pool
    pub fn release(&mut self, color: Color) -> Result<(), ColorError> {
        if !self.palette.contains(&color) {
            return Err(ColorError::NotInPalette(color));
        }
        if self.available.contains(&color) {
            return Err(ColorError::AlreadyAvailable(color));
        }
        self.available.push(color);
        Ok(())
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn available(&self) -> &[Color] {
        &self.available
    }

    #[cfg(test)]
    pub fn is_exhausted(&self) -> bool {
        self.available.is_empty()
    }
}
