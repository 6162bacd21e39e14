//! Blob labeling regression test
//!
//! Labels a mask loaded through the PBM codec, measures the blobs, picks
//! the largest one and marks it on a color copy.

use roadsign_core::{Channels, ImageBuffer, Rect};
use roadsign_io::{read_image_mem, write_image_mem};
use roadsign_region::{
    MarkOptions, analyze_blobs, analyze_largest_blob, label_blobs, mark_blobs,
};
use roadsign_test::RegParams;

fn fill_rect(img: &mut ImageBuffer, rect: Rect) {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            img.set_pixel(x as u32, y as u32, &[255]).unwrap();
        }
    }
}

/// Two 3x3 squares, a single pixel, and a 10x6 bar
fn test_mask() -> ImageBuffer {
    let mut img = ImageBuffer::new(40, 30, Channels::One, 1).unwrap();
    fill_rect(&mut img, Rect::new(2, 2, 3, 3));
    fill_rect(&mut img, Rect::new(10, 2, 3, 3));
    fill_rect(&mut img, Rect::new(20, 20, 1, 1));
    fill_rect(&mut img, Rect::new(25, 10, 10, 6));
    img
}

#[test]
fn label_reg() {
    let mut rp = RegParams::new("label");

    // --- Mask survives a PBM round trip ---
    let encoded = write_image_mem(&test_mask()).unwrap();
    rp.compare_strings(b"P4", &encoded[..2]);
    let mask = read_image_mem(&encoded).unwrap();
    rp.compare_images(&test_mask(), &mask);
    rp.compare_values(9.0 + 9.0 + 1.0 + 60.0, mask.count_nonzero() as f64, 0.0);

    // --- Labeling ---
    let mut labels = mask.new_like();
    let mut blobs = label_blobs(&mask, &mut labels).unwrap();
    rp.compare_values(4.0, blobs.len() as f64, 0.0);
    analyze_blobs(&labels, &mut blobs).unwrap();

    let areas: Vec<u32> = blobs.iter().map(|b| b.area).collect();
    rp.compare_values(9.0, areas[0] as f64, 0.0);
    rp.compare_values(9.0, areas[1] as f64, 0.0);
    rp.compare_values(60.0, areas[2] as f64, 0.0);
    rp.compare_values(1.0, areas[3] as f64, 0.0);

    // Labels are distinct and every member pixel carries its blob's label
    rp.compare_values(
        1.0,
        if blobs[0].label != blobs[1].label { 1.0 } else { 0.0 },
        0.0,
    );
    rp.compare_values(blobs[0].label as f64, labels.sample(3, 3).unwrap() as f64, 0.0);
    rp.compare_values(blobs[1].label as f64, labels.sample(11, 3).unwrap() as f64, 0.0);
    rp.compare_values(0.0, labels.sample(6, 3).unwrap() as f64, 0.0);

    // --- Square metrics ---
    let sq = &blobs[0];
    rp.compare_values(3.0, sq.xc as f64, 0.0);
    rp.compare_values(3.0, sq.yc as f64, 0.0);
    rp.compare_values(8.0, sq.perimeter as f64, 0.0);
    let bbox_ok = sq.bbox == Rect::new(2, 2, 3, 3);
    rp.compare_values(1.0, if bbox_ok { 1.0 } else { 0.0 }, 0.0);

    // --- A single pixel is its own perimeter ---
    let dot = &blobs[3];
    rp.compare_values(1.0, dot.perimeter as f64, 0.0);
    rp.compare_values(20.0, dot.xc as f64, 0.0);

    // --- Bar: ring of 2*10 + 2*4 pixels, ratio 28/16 ---
    let bar = &blobs[2];
    rp.compare_values(28.0, bar.perimeter as f64, 0.0);
    rp.compare_values(1.75, bar.perimeter_ratio().unwrap() as f64, 1e-6);

    // --- Largest blob ---
    let mut fresh = label_blobs(&mask, &mut labels).unwrap();
    let largest = analyze_largest_blob(&labels, &mut fresh).unwrap();
    rp.compare_values(2.0, largest.unwrap() as f64, 0.0);
    rp.compare_values(60.0, fresh[2].area as f64, 0.0);
    rp.compare_values(28.0, fresh[2].perimeter as f64, 0.0);

    // --- Marking ---
    let frame = ImageBuffer::from_bgr_frame(40, 30, &vec![40u8; 40 * 30 * 3]).unwrap();
    let mut marked = frame.new_like();
    let options = MarkOptions::default().with_color([0, 255, 0]);
    mark_blobs(&frame, &mut marked, &blobs[2..3], &options).unwrap();
    rp.compare_values(255.0, marked.pixel(25, 10).unwrap()[1] as f64, 0.0);
    rp.compare_values(255.0, marked.pixel(34, 15).unwrap()[1] as f64, 0.0);
    rp.compare_values(255.0, marked.pixel(bar.xc as u32, bar.yc as u32).unwrap()[1] as f64, 0.0);
    rp.compare_values(40.0, marked.pixel(3, 3).unwrap()[1] as f64, 0.0);
    rp.write_image(&marked, "marked").unwrap();

    assert!(rp.cleanup());
}
