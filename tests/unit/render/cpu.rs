use super::*;

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> PreparedImage {
    PreparedImage::from_premul(w, h, rgba.repeat((w * h) as usize)).unwrap()
}

fn pixel(frame: &Frame, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn assert_close(got: [u8; 4], want: [u8; 4]) {
    for (g, w) in got.iter().zip(want) {
        assert!(g.abs_diff(w) <= 2, "got {got:?}, want {want:?}");
    }
}

fn transparent_overlay(w: u32, h: u32) -> OverlayTemplate {
    OverlayTemplate::from_image(solid(w, h, CLEAR), None).unwrap()
}

#[test]
fn photo_covers_whole_canvas() {
    let mut c = CpuCompositor::new(&transparent_overlay(4, 4)).unwrap();
    let frame = c.compose(&solid(8, 2, RED)).unwrap();
    assert_eq!((frame.width, frame.height), (4, 4));
    for y in 0..4 {
        for x in 0..4 {
            assert_close(pixel(&frame, x, y), RED);
        }
    }
}

#[test]
fn oversized_photo_is_downscaled_and_still_covers() {
    let mut c = CpuCompositor::new(&transparent_overlay(4, 4)).unwrap();
    let frame = c.compose(&solid(70_000, 2, RED)).unwrap();
    assert_eq!((frame.width, frame.height), (4, 4));
    for y in 0..4 {
        for x in 0..4 {
            assert_close(pixel(&frame, x, y), RED);
        }
    }
}

#[test]
fn oversized_overlay_is_downscaled() {
    let overlay = OverlayTemplate::from_image(
        solid(2, 70_000, CLEAR),
        Some(Canvas::new(4, 4).unwrap()),
    )
    .unwrap();
    let mut c = CpuCompositor::new(&overlay).unwrap();
    let frame = c.compose(&solid(4, 4, GREEN)).unwrap();
    assert_close(pixel(&frame, 2, 2), GREEN);
}

#[test]
fn wide_photo_is_cropped_around_its_center() {
    // 8x4 photo: left half red, right half green. Cover-fit into 4x4 keeps columns 2..6.
    let mut rgba = Vec::new();
    for _y in 0..4 {
        for x in 0..8 {
            rgba.extend_from_slice(if x < 4 { &RED } else { &GREEN });
        }
    }
    let photo = PreparedImage::from_premul(8, 4, rgba).unwrap();

    let mut c = CpuCompositor::new(&transparent_overlay(4, 4)).unwrap();
    let frame = c.compose(&photo).unwrap();
    assert_close(pixel(&frame, 0, 2), RED);
    assert_close(pixel(&frame, 1, 2), RED);
    assert_close(pixel(&frame, 2, 2), GREEN);
    assert_close(pixel(&frame, 3, 2), GREEN);
}

#[test]
fn overlay_is_drawn_on_top() {
    // Opaque blue top half, transparent bottom half.
    let mut rgba = Vec::new();
    for y in 0..4 {
        for _x in 0..4 {
            rgba.extend_from_slice(if y < 2 { &BLUE } else { &CLEAR });
        }
    }
    let overlay =
        OverlayTemplate::from_image(PreparedImage::from_premul(4, 4, rgba).unwrap(), None)
            .unwrap();

    let mut c = CpuCompositor::new(&overlay).unwrap();
    let frame = c.compose(&solid(3, 3, RED)).unwrap();
    assert_close(pixel(&frame, 0, 0), BLUE);
    assert_close(pixel(&frame, 3, 0), BLUE);
    assert_close(pixel(&frame, 0, 3), RED);
    assert_close(pixel(&frame, 3, 3), RED);
}

#[test]
fn canvas_is_cleared_between_photos() {
    let mut c = CpuCompositor::new(&transparent_overlay(4, 4)).unwrap();
    c.compose(&solid(4, 4, RED)).unwrap();
    let frame = c.compose(&solid(4, 4, GREEN)).unwrap();
    assert_close(pixel(&frame, 1, 1), GREEN);
}

#[test]
fn straight_copy_unpremultiplies() {
    let frame = Frame {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
    };
    let straight = frame.to_straight_rgba8();
    assert_eq!(straight[3], 128);
    assert!(straight[0].abs_diff(128) <= 1);
}
