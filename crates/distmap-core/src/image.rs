use serde::{Deserialize, Serialize};

/// Raster buffer validation errors.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid raster dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid raster buffer length (expected {expected} values, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },
}

fn checked_len(width: usize, height: usize) -> Result<usize, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(ImageError::InvalidDimensions { width, height })
}

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

impl<'a> GrayImageView<'a> {
    /// Wrap a row-major buffer, checking that it matches the dimensions.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        let view = Self {
            width,
            height,
            data,
        };
        view.validate()?;
        Ok(view)
    }

    /// Check that the view is non-empty and `data.len() == width * height`.
    pub fn validate(&self) -> Result<(), ImageError> {
        let expected = checked_len(self.width, self.height)?;
        if self.data.len() != expected {
            return Err(ImageError::InvalidBufferLength {
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

#[derive(Clone, Debug)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Allocate an image filled with a constant value.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self, ImageError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.data[y * self.width + x] = value;
    }

    #[inline]
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Owned 16-bit raster, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u16>,
}

impl DistanceImage {
    pub fn filled(width: usize, height: usize, value: u16) -> Result<Self, ImageError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    pub fn from_raw(width: usize, height: usize, data: Vec<u16>) -> Result<Self, ImageError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(ImageError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u16) {
        self.data[y * self.width + x] = value;
    }

    /// Row `y` as a slice.
    #[inline]
    pub fn row(&self, y: usize) -> &[u16] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    pub fn into_raw(self) -> Vec<u16> {
        self.data
    }
}
