use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn premultiply_matches_rounded_product() {
    let mut px = vec![100u8, 50, 200, 128, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        &px[..4],
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
    assert_eq!(&px[4..], &[0, 0, 0, 0]);
}

#[test]
fn unpremultiply_leaves_opaque_untouched() {
    let mut px = vec![12u8, 34, 56, 255];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![12, 34, 56, 255]);

    let mut half = vec![50u8, 0, 25, 128];
    unpremultiply_rgba8_in_place(&mut half);
    assert_eq!(half[0], 100);
    assert_eq!(half[2], 50);
}
