//! VNFD-level software image catalog

use super::builder::VnfdBuilder;
use crate::error::Result;
use crate::im::de::non_empty;
use crate::im::{ImVdu, ImVnfd};
use crate::index::dedup_ordered;
use crate::sol006::SwImageDesc;

/// Image descriptors of one VDU, primary first
fn vdu_images(vdu: &ImVdu) -> impl Iterator<Item = SwImageDesc> + '_ {
    let primary = non_empty(&vdu.image).map(SwImageDesc::new);
    let alternatives = vdu.alternative_images.iter().filter_map(|alt| {
        non_empty(&alt.image).map(|image| SwImageDesc {
            vim_type: non_empty(&alt.vim_type).map(str::to_string),
            ..SwImageDesc::new(image)
        })
    });
    primary.into_iter().chain(alternatives)
}

/// Deduplicated by image string across all VDUs, first occurrence wins
pub(super) fn add_images(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    let images = im.vdu.iter().flat_map(vdu_images);
    builder.vnfd_mut().sw_image_desc = dedup_ordered(images, |desc| desc.id.clone());
    Ok(())
}
