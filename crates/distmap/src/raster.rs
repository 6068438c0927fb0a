use crate::{chamfer, core};
use ::image::{GrayImage, ImageBuffer, Luma};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// 16-bit grayscale buffer holding a distance map.
pub type Luma16Image = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Errors produced by the `image` adapters.
#[derive(thiserror::Error, Debug)]
pub enum RasterError {
    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error(transparent)]
    Buffer(#[from] core::ImageError),

    #[error(transparent)]
    DistanceMap(#[from] chamfer::DistanceMapError),

    #[error("distance map of {width}x{height} does not fit an image buffer")]
    Unrepresentable { width: usize, height: usize },
}

/// Borrow an `image::GrayImage` as a `distmap-core` view.
pub fn gray_view(img: &GrayImage) -> core::GrayImageView<'_> {
    core::GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Build an `image::GrayImage` from a raw row-major buffer.
pub fn gray_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<GrayImage, RasterError> {
    core::GrayImageView::new(width as usize, height as usize, pixels)?;
    GrayImage::from_raw(width, height, pixels.to_vec()).ok_or(RasterError::Unrepresentable {
        width: width as usize,
        height: height as usize,
    })
}

/// Compute the chamfer distance map of a decoded grayscale mask.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, params),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn distance_map_image(
    img: &GrayImage,
    params: &chamfer::DistanceMapParams,
) -> Result<chamfer::DistanceMap, RasterError> {
    Ok(chamfer::distance_map_from_view(gray_view(img), params)?)
}

/// Copy a distance map into a 16-bit `image` buffer.
pub fn to_luma16(map: &chamfer::DistanceMap) -> Result<Luma16Image, RasterError> {
    let unrepresentable = RasterError::Unrepresentable {
        width: map.width(),
        height: map.height(),
    };
    let (Ok(width), Ok(height)) = (u32::try_from(map.width()), u32::try_from(map.height())) else {
        return Err(unrepresentable);
    };
    ImageBuffer::from_raw(width, height, map.image.data.clone()).ok_or(unrepresentable)
}

/// Decode `input`, compute its distance map and save it as a 16-bit image at `output`.
pub fn distance_map_file(
    input: impl AsRef<std::path::Path>,
    output: impl AsRef<std::path::Path>,
    params: &chamfer::DistanceMapParams,
) -> Result<chamfer::DistanceMap, RasterError> {
    let img = ::image::open(input.as_ref())?.to_luma8();
    let map = distance_map_image(&img, params)?;
    to_luma16(&map)?.save(output.as_ref())?;
    log::info!(
        "wrote {}x{} distance map to {}",
        map.width(),
        map.height(),
        output.as_ref().display()
    );
    Ok(map)
}
