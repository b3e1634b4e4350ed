use super::*;

fn checker(w: u32, h: u32, shade: u8) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgba([shade, 0, 0, 255])
        } else {
            image::Rgba([0, 0, 255, 255])
        }
    })
}

#[test]
fn assembler_preserves_order_and_metadata() {
    let mut asm = AnimationAssembler::new(8, 4, 8).unwrap();
    assert!(asm.is_empty());
    asm.push(RgbaImage::from_pixel(8, 4, image::Rgba([0, 0, 0, 255])))
        .unwrap();
    asm.push(RgbaImage::from_pixel(8, 4, image::Rgba([255, 255, 255, 255])))
        .unwrap();
    assert_eq!(asm.len(), 2);

    let anim = asm.finish();
    assert_eq!(anim.loop_count, 0);
    assert_eq!((anim.width, anim.height), (8, 4));
    assert_eq!(anim.palette.len(), 256 * 3);
    assert_eq!(anim.frames.len(), 2);
    assert!(anim.frames.iter().all(|f| f.delay_cs == 8));
    assert!(anim.frames[0].indices.iter().all(|&i| i == 0));
    assert!(anim.frames[1].indices.iter().all(|&i| i == 255));
}

#[test]
fn assembler_rejects_mismatched_frames() {
    let mut asm = AnimationAssembler::new(8, 4, 8).unwrap();
    let err = asm.push(checker(4, 4, 255)).unwrap_err();
    assert!(matches!(err, SpudcatError::Encode(_)));
    assert!(AnimationAssembler::new(70_000, 1, 8).is_err());
}

#[test]
fn gif_container_carries_frames_delay_and_loop() {
    let mut asm = AnimationAssembler::new(6, 6, 8).unwrap();
    for shade in [255, 128, 64] {
        asm.push(checker(6, 6, shade)).unwrap();
    }
    let bytes = asm.finish().to_gif_bytes().unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");

    let mut decoder = gif::DecodeOptions::new()
        .read_info(std::io::Cursor::new(bytes))
        .unwrap();
    assert_eq!((decoder.width(), decoder.height()), (6, 6));
    let mut frames = 0;
    while let Some(frame) = decoder.read_next_frame().unwrap() {
        assert_eq!(frame.delay, 8);
        assert_eq!((frame.width, frame.height), (6, 6));
        frames += 1;
    }
    assert_eq!(frames, 3);
    assert!(matches!(decoder.repeat(), gif::Repeat::Infinite));
}

#[test]
fn empty_animation_is_an_encode_error() {
    let anim = AnimationAssembler::new(4, 4, 8).unwrap().finish();
    let err = anim.to_gif_bytes().unwrap_err();
    assert!(matches!(err, SpudcatError::Encode(_)));
}
