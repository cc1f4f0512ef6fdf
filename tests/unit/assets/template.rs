use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn raster_template_defaults_canvas_to_its_own_size() {
    let t = OverlayTemplate::from_raster_bytes(&png_bytes(12, 15, [0, 0, 0, 0]), None).unwrap();
    assert_eq!(t.canvas(), Canvas::new(12, 15).unwrap());
    assert_eq!(t.image().width, 12);
}

#[test]
fn explicit_canvas_overrides_template_size() {
    let canvas = Canvas::new(30, 40).unwrap();
    let t = OverlayTemplate::from_raster_bytes(&png_bytes(3, 4, [1, 2, 3, 255]), Some(canvas))
        .unwrap();
    assert_eq!(t.canvas(), canvas);
    // Raster pixels stay native; scaling happens when drawing.
    assert_eq!((t.image().width, t.image().height), (3, 4));
}

#[test]
fn svg_template_is_rasterized_at_canvas_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20">
        <rect x="0" y="0" width="10" height="20" fill="#ff0000"/>
    </svg>"##;

    let t = OverlayTemplate::from_svg_bytes(svg, None).unwrap();
    assert_eq!(t.canvas(), Canvas::new(10, 20).unwrap());

    let canvas = Canvas::new(20, 40).unwrap();
    let t = OverlayTemplate::from_svg_bytes(svg, Some(canvas)).unwrap();
    assert_eq!(t.canvas(), canvas);
    assert_eq!((t.image().width, t.image().height), (20, 40));
    let center = (20 * 20 + 10) * 4;
    assert_eq!(&t.image().rgba8_premul[center..center + 4], &[255, 0, 0, 255]);
}

#[test]
fn load_missing_template_fails() {
    let path = std::env::temp_dir().join("layoutpack_no_such_template.png");
    assert!(OverlayTemplate::load(&path, None).is_err());
}

#[test]
fn load_undecodable_template_names_the_file() {
    let dir = std::env::temp_dir().join(format!("layoutpack_tpl_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("posting-layout.png");
    std::fs::write(&path, b"not a png").unwrap();

    let err = OverlayTemplate::load(&path, None).unwrap_err();
    assert!(matches!(err, LayoutError::Decode(_)));
    assert!(err.to_string().contains("posting-layout.png"));

    std::fs::remove_dir_all(&dir).ok();
}
