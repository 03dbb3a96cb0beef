//! Draw dispatch against a recording device.

use billboard3d_core::{ContentKind, TexturePayload};
use billboard3d_render::{dispatch, FrameTextures, GraphicsDevice, ShaderFlag, TextureSlot};
use billboard3d_testkit::{DeviceCommand, RecordingDevice};

#[test]
fn multi_text_draws_everything_with_foreground_pass() {
    let mut device = RecordingDevice::new();
    let plan = dispatch(&mut device, ContentKind::MultiText, 5, FrameTextures::default());

    assert_eq!(plan.len(), 1);
    assert_eq!(device.passes(), vec![0]);
    assert_eq!(device.draws(), vec![(5, 0)]);
}

#[test]
fn single_text_splits_background_and_foreground() {
    let mut device = RecordingDevice::new();
    dispatch(&mut device, ContentKind::SingleText, 12, FrameTextures::default());

    assert_eq!(device.passes(), vec![1, 0]);
    assert_eq!(device.draws(), vec![(6, 6), (6, 0)]);
}

#[test]
fn single_text_with_seven_vertices_is_skipped() {
    let mut device = RecordingDevice::new();
    let plan = dispatch(&mut device, ContentKind::SingleText, 7, FrameTextures::default());

    assert!(plan.is_empty());
    assert!(device.draws().is_empty());
    assert!(device.passes().is_empty());
}

#[test]
fn single_image_uses_pass_two() {
    let mut device = RecordingDevice::new();
    dispatch(&mut device, ContentKind::SingleImage, 6, FrameTextures::default());

    assert_eq!(device.passes(), vec![2]);
    assert_eq!(device.draws(), vec![(6, 0)]);
}

#[test]
fn texture_flags_are_written_before_draws() {
    let mut device = RecordingDevice::new();
    let alpha = device
        .load_texture(TextureSlot::Alpha, &TexturePayload::from_bytes(vec![7u8, 7, 7]))
        .unwrap();
    device.clear();

    let textures = FrameTextures {
        texture: None,
        alpha_texture: Some(&alpha),
    };
    dispatch(&mut device, ContentKind::SingleImage, 6, textures);

    assert_eq!(
        device.commands(),
        &[
            DeviceCommand::SetFlag(ShaderFlag::HasTexture, false),
            DeviceCommand::SetFlag(ShaderFlag::HasAlphaTexture, true),
            DeviceCommand::BindTexture {
                slot: TextureSlot::Alpha,
                id: alpha.id,
            },
            DeviceCommand::ApplyPass(2),
            DeviceCommand::Draw {
                vertex_count: 6,
                start_vertex: 0,
            },
        ]
    );
}
