//! Property tests for the billboard vertex builder.

use billboard3d_core::{BillboardError, ContentKind};
use billboard3d_render::VertexArena;
use billboard3d_testkit::StaticSource;
use glam::{Vec2, Vec3};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = ContentKind> {
    prop_oneof![
        Just(ContentKind::MultiText),
        Just(ContentKind::SingleText),
        Just(ContentKind::SingleImage),
    ]
}

proptest! {
    /// Property: output length equals the anchor count and offsets land in tex_coord.zw
    #[test]
    fn build_copies_every_entry(
        kind in kind_strategy(),
        offsets in prop::collection::vec((-500.0f32..500.0, -500.0f32..500.0), 0..64),
    ) {
        let count = offsets.len();
        let mut source = StaticSource::with_vertices(kind, count);
        source.offsets = offsets.iter().map(|&(x, y)| Vec2::new(x, y)).collect();

        let mut arena = VertexArena::new();
        let built_kind = arena.build(&mut source, true).unwrap();

        prop_assert_eq!(built_kind, kind);
        prop_assert_eq!(arena.len(), count);
        prop_assert_eq!(source.prepare_calls, 1);
        for (i, vertex) in arena.vertices().iter().enumerate() {
            prop_assert_eq!(vertex.tex_coord[2], offsets[i].0);
            prop_assert_eq!(vertex.tex_coord[3], offsets[i].1);
            prop_assert_eq!(vertex.color, source.colors[i]);
            prop_assert_eq!(vertex.position[3], 1.0);
        }
    }

    /// Property: non-increasing lengths never reallocate while reuse is on
    #[test]
    fn reuse_never_reallocates_when_shrinking(
        mut lengths in prop::collection::vec(1usize..48, 1..8),
    ) {
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        let mut arena = VertexArena::new();
        arena
            .build(&mut StaticSource::with_vertices(ContentKind::MultiText, lengths[0]), true)
            .unwrap();
        let storage = arena.storage_ptr();

        for &len in &lengths[1..] {
            arena
                .build(&mut StaticSource::with_vertices(ContentKind::MultiText, len), true)
                .unwrap();
            prop_assert_eq!(arena.storage_ptr(), storage);
            prop_assert_eq!(arena.len(), len);
        }
        prop_assert_eq!(arena.allocations(), 1);
    }
}

#[test]
fn mismatched_colors_are_rejected() {
    let mut source = StaticSource::with_vertices(ContentKind::MultiText, 2);
    source.positions = vec![Vec3::ZERO, Vec3::X];
    source.colors.truncate(1);

    let mut arena = VertexArena::new();
    let err = arena.build(&mut source, true).unwrap_err();
    assert!(matches!(
        err,
        BillboardError::MalformedSource {
            positions: 2,
            colors: 1,
            ..
        }
    ));
}

#[test]
fn mismatched_offsets_are_rejected() {
    let mut source = StaticSource::with_vertices(ContentKind::SingleImage, 6);
    source.offsets.pop();
    let err = VertexArena::new().build(&mut source, false).unwrap_err();
    assert!(matches!(err, BillboardError::MalformedSource { offsets: 5, .. }));
}
