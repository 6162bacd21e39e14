//! Image buffer regression test
//!
//! Frame ingestion, pixel access, drawing, and the geometry checks used by
//! every two-image operation.

use roadsign_core::{Channels, Error, ImageBuffer, Rect};
use roadsign_test::RegParams;

#[test]
fn image_reg() {
    let mut rp = RegParams::new("image");

    // --- Test 1: packed BGR frame ingestion ---
    let (w, h) = (64u32, 48u32);
    let frame: Vec<u8> = (0..w * h * 3).map(|i| (i % 251) as u8).collect();
    let img = ImageBuffer::from_bgr_frame(w, h, &frame).unwrap();
    rp.compare_values((w * 3) as f64, img.stride() as f64, 0.0);
    rp.compare_values(255.0, img.levels() as f64, 0.0);
    let px = img.pixel(10, 20).unwrap();
    let off = (20 * w * 3 + 10 * 3) as usize;
    rp.compare_strings(&frame[off..off + 3], px);

    // Short frame is rejected
    let short = ImageBuffer::from_bgr_frame(w, h, &frame[1..]);
    rp.compare_values(
        1.0,
        if matches!(short, Err(Error::BufferSize { .. })) { 1.0 } else { 0.0 },
        0.0,
    );

    // --- Test 2: clone is a deep copy ---
    let mut copy = img.clone();
    copy.set_pixel(0, 0, &[1, 2, 3]).unwrap();
    rp.compare_values(frame[0] as f64, img.data()[0] as f64, 0.0);
    rp.compare_values(1.0, copy.data()[0] as f64, 0.0);

    // --- Test 3: annotation on a copy of the frame ---
    let mut marked = img.new_like();
    marked.copy_from(&img).unwrap();
    let bbox = Rect::new(5, 5, 20, 10);
    marked.draw_rect_outline(&bbox, 2, &[0, 0, 255]).unwrap();
    marked.draw_cross(bbox.center_x(), bbox.center_y(), 3, &[0, 255, 0]).unwrap();
    rp.compare_strings(&[0, 0, 255], marked.pixel(5, 5).unwrap());
    rp.compare_strings(&[0, 0, 255], marked.pixel(6, 6).unwrap());
    rp.compare_strings(&[0, 255, 0], marked.pixel(15, 10).unwrap());
    rp.compare_strings(img.pixel(8, 8).unwrap(), marked.pixel(8, 8).unwrap());
    rp.write_image(&marked, "marked").unwrap();

    // --- Test 4: geometry checks ---
    let mask = img.new_with_channels(Channels::One);
    rp.compare_values(
        1.0,
        if img.check_geometry(Channels::Three, &mask, Channels::One).is_ok() { 1.0 } else { 0.0 },
        0.0,
    );
    let other = ImageBuffer::new(w + 1, h, Channels::One, 255).unwrap();
    let err = img.check_geometry(Channels::Three, &other, Channels::One);
    rp.compare_values(
        1.0,
        if matches!(err, Err(Error::DimensionMismatch { .. })) { 1.0 } else { 0.0 },
        0.0,
    );

    assert!(rp.cleanup());
}
