mod support;

use image::{Rgba, RgbaImage};
use sprite_font::{
    BitmapFont, Font, FontDescriptor, FontError, FontOptions, FreeDimsFont, RenderOptions, Rgb,
    MAX_SPACING,
};
use support::*;
use test_log::test;

fn ink() -> Rgb {
    Rgb::new(INK[0], INK[1], INK[2])
}

#[test]
fn loads_explicit_rectangles() {
    let fixture = Fixture::new();
    let font = Font::load(&FontOptions::new(fixture.free_dims(r#", "spacing": [1, 2]"#))).unwrap();

    assert!(matches!(font, Font::FreeDims(_)));
    assert_eq!(font.font_height(), HEIGHT);
    assert_eq!(font.text_width("AB"), WIDTH_A + WIDTH_B + 2);
    assert_eq!(font.bounding_box("A\nB").height, 2 * (HEIGHT + 2));

    let rendered = font.render("BA", &RenderOptions::new()).unwrap();
    assert_eq!(rendered.rect, font.bounding_box("BA"));
    assert_eq!(rendered.surface.get_at(0, 1), Some(ink()));
    // the spacing column after B stays background
    assert_eq!(rendered.surface.get_at(WIDTH_B, 1), Some(Rgb::BLACK));
    assert_eq!(rendered.surface.get_at(WIDTH_B + 1, 1), Some(ink()));
}

#[test]
fn height_is_the_tallest_glyph() {
    let fixture = Fixture::new();
    let path = fixture.write(
        "mixed.json",
        r#"{
    "font_image": "atlas.png",
    "chars": {
        "A": {"x": 0, "y": 0, "width": 10, "height": 8},
        ".": {"x": 24, "y": 4, "width": 2, "height": 4}
    }
}"#,
    );
    let font = FreeDimsFont::load(&FontOptions::new(path).with_size(16)).unwrap();
    assert_eq!(font.font_height(), 16);
    assert_eq!(font.text_width("."), 4);
    assert_eq!(font.render(".", &RenderOptions::new()).unwrap().rect.height, 16);
}

#[test]
fn descriptor_comments_are_ignored() {
    let fixture = Fixture::new();
    let path = fixture.write(
        "commented.json",
        r#"{
    // atlas next to this file
    "font_image": "atlas.png",
    "chars": {
        "A": {"x": 0, "y": 0, "width": 10, "height": 8} // the only glyph
    }
}"#,
    );
    let font = Font::load(&FontOptions::new(path)).unwrap();
    assert_eq!(font.text_width("A"), WIDTH_A);
}

#[test]
fn missing_descriptor_is_not_found() {
    let fixture = Fixture::new();
    let err = Font::load(&FontOptions::new(fixture.path("nope.json"))).unwrap_err();
    assert!(matches!(err, FontError::NotFound { what: "font descriptor", .. }));
}

#[test]
fn missing_atlas_is_not_found() {
    let fixture = Fixture::new();
    let path = fixture.write(
        "lost.json",
        r#"{"font_image": "no-such-atlas.png", "chars": {"A": {"x": 0, "y": 0, "width": 1, "height": 1}}}"#,
    );
    let err = FontDescriptor::load(&path).unwrap_err();
    assert!(matches!(err, FontError::NotFound { what: "font image", .. }));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let fixture = Fixture::new();
    let path = fixture.write("broken.json", r#"{"font_image": "atlas.png", "chars": "#);
    let err = Font::load(&FontOptions::new(path)).unwrap_err();
    assert!(matches!(err, FontError::Parse { .. }));
}

#[test]
fn invalid_fields_are_validation_errors() {
    let fixture = Fixture::new();
    let cases = [
        (r#"{"chars": {"A": {"x": 0, "y": 0, "width": 1, "height": 1}}}"#, "font_image"),
        (r#"{"font_image": "atlas.png"}"#, "chars"),
        (r#"{"font_image": "atlas.png", "chars": {}}"#, "chars"),
        (
            r#"{"font_image": "atlas.png", "chars": {"AB": {"x": 0, "y": 0, "width": 1, "height": 1}}}"#,
            "chars",
        ),
        (
            r#"{"font_image": "atlas.png", "chars": {"A": {"x": -1, "y": 0, "width": 1, "height": 1}}}"#,
            "chars",
        ),
        (
            r#"{"font_image": "atlas.png", "character_order": ["A"]}"#,
            "separator_color",
        ),
        (
            r#"{"font_image": "atlas.png", "separator_color": "gray", "character_order": []}"#,
            "character_order",
        ),
        (
            r#"{"font_image": "atlas.png", "spacing": [1], "chars": {"A": {"x": 0, "y": 0, "width": 1, "height": 1}}}"#,
            "spacing",
        ),
        (
            r#"{"font_image": "atlas.png", "font_color": "nope", "chars": {"A": {"x": 0, "y": 0, "width": 1, "height": 1}}}"#,
            "font_color",
        ),
    ];

    for (body, expected) in cases {
        let path = fixture.write("invalid.json", body);
        match Font::load(&FontOptions::new(&path)) {
            Err(FontError::Validation { field, .. }) => assert_eq!(field, expected, "{}", body),
            other => panic!("expected a validation error for {}, got {:?}", body, other.map(|_| ())),
        }
    }
}

#[test]
fn colorkey_detection_is_opt_in() {
    let fixture = Fixture::new();
    let white = Rgba([255, 255, 255, 255]);
    let mut image = RgbaImage::from_pixel(12, 10, white);
    for x in 1..11 {
        for y in 1..9 {
            image.put_pixel(x, y, Rgba([255, 0, 0, 255]));
        }
    }
    image.put_pixel(1, 1, white);
    fixture.write_image("framed.png", &image);
    let path = fixture.write(
        "framed.json",
        r#"{"font_image": "framed.png", "chars": {"A": {"x": 1, "y": 1, "width": 10, "height": 8}}}"#,
    );

    let plain = Font::load(&FontOptions::new(&path)).unwrap();
    assert_eq!(plain.face().colorkey(), Rgb::BLACK);

    let detected = Font::load(&FontOptions::new(&path).with_detect_colorkey(true)).unwrap();
    assert_eq!(detected.face().colorkey(), Rgb::WHITE);
    let rendered = detected.render("A", &RenderOptions::new()).unwrap();
    assert_eq!(rendered.surface.colorkey(), Some(Rgb::WHITE));
    assert_eq!(rendered.surface.get_at(0, 0), Some(Rgb::WHITE));
    assert_eq!(rendered.surface.get_at(1, 0), Some(ink()));
}

#[test]
fn rendered_text_saves_as_keyed_png() {
    let fixture = Fixture::new();
    let font = Font::load(&FontOptions::new(fixture.free_dims(""))).unwrap();
    let rendered = font.render("AB", &RenderOptions::new()).unwrap();

    let out = fixture.path("out.png");
    rendered.surface.save(&out).unwrap();

    let saved = image::open(&out).unwrap().to_rgba8();
    assert_eq!(saved.dimensions(), (WIDTH_A + WIDTH_B, HEIGHT));
    assert_eq!(saved.get_pixel(0, 0).0[3], 0);
    assert_eq!(saved.get_pixel(0, 1).0, [255, 0, 0, 255]);
}

#[test]
fn black_ink_loads_once_a_white_colorkey_is_detected() {
    let fixture = Fixture::new();
    let white = Rgba([255, 255, 255, 255]);
    let mut image = RgbaImage::from_pixel(12, 10, white);
    for x in 1..11 {
        for y in 2..9 {
            image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }
    fixture.write_image("paper.png", &image);
    let path = fixture.write(
        "paper.json",
        r##"{"font_image": "paper.png", "font_color": "#000000", "chars": {"A": {"x": 1, "y": 1, "width": 10, "height": 8}}}"##,
    );

    let err = Font::load(&FontOptions::new(&path)).unwrap_err();
    assert!(matches!(err, FontError::Validation { field: "font_color", .. }));

    let green = Rgb::new(0, 255, 0);
    let font = Font::load(&FontOptions::new(&path).with_detect_colorkey(true)).unwrap();
    assert_eq!(font.face().colorkey(), Rgb::WHITE);
    let rendered = font.render("A", &RenderOptions::new().with_color(green)).unwrap();
    assert_eq!(rendered.surface.get_at(0, 0), Some(Rgb::WHITE));
    assert_eq!(rendered.surface.get_at(0, 1), Some(green));
}

#[test]
fn oversized_spacing_is_rejected() {
    let fixture = Fixture::new();
    let err = Font::load(&FontOptions::new(fixture.free_dims(r#", "spacing": [4294967295, 0]"#)))
        .unwrap_err();
    assert!(matches!(err, FontError::Validation { field: "spacing", .. }));

    let err = Font::load(&FontOptions::new(fixture.free_dims("")).with_spacing(0, u32::MAX))
        .unwrap_err();
    assert!(matches!(err, FontError::Validation { field: "spacing", .. }));

    let widest = MAX_SPACING;
    let font = Font::load(&FontOptions::new(fixture.free_dims("")).with_spacing(widest, 0)).unwrap();
    assert_eq!(font.bounding_box("A").width, WIDTH_A + widest);
}

#[test]
fn rendering_in_the_colorkey_is_a_contract_violation() {
    let fixture = Fixture::new();
    let font = Font::load(&FontOptions::new(fixture.free_dims(r#", "font_color": [255, 0, 0]"#)))
        .unwrap();
    assert!(matches!(font, Font::FreeDims(_)));

    let err = font
        .render("AB", &RenderOptions::new().with_color(Rgb::BLACK))
        .unwrap_err();
    assert!(matches!(err, FontError::ContractViolation(_)));

    let err = Font::load(
        &FontOptions::new(fixture.free_dims(r#", "font_color": [255, 0, 0]"#)).with_color(Rgb::BLACK),
    )
    .unwrap_err();
    assert!(matches!(err, FontError::ContractViolation(_)));
}
