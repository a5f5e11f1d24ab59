use crate::{Bitmap, BitmapError, MAX_BIT, Result};
use roaring::RoaringBitmap;

impl Bitmap {
    /// Build from a `RoaringBitmap`. Fails if it holds a bit above `MAX_BIT`.
    pub fn from_roaring(rb: &RoaringBitmap) -> Result<Self> {
        let (Some(min), Some(max)) = (rb.min(), rb.max()) else {
            return Ok(Self::new_empty());
        };
        if max > MAX_BIT {
            return Err(BitmapError::out_of_range(max));
        }

        // Size storage once up front, then fill.
        let mut bitmap = Self::new(min)?;
        bitmap.extend(max)?;
        for bit in rb {
            bitmap.set_bit(bit)?;
        }
        Ok(bitmap)
    }

    /// Convert this bitmap to a `RoaringBitmap`.
    pub fn to_roaring(&self) -> RoaringBitmap {
        self.iter().collect()
    }
}
