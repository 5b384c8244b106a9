//! Content renderers, one per known section type.

use crate::style::heading_style;
use crate::vdom::{VNode, ITEM_CLASS};
use pagebuilder_model::{attributes, Collection, HeadingProps, Item, Product, TEMP_ID_KEY};

/// `div.item` carrying the item's mirrored fields and its id
pub fn item_container(item: &Item, class: &str) -> VNode {
    VNode::element("div")
        .with_class(ITEM_CLASS)
        .with_class(class)
        .with_attrs(attributes::encode(&item.fields))
        .with_attr(
            attributes::data_attribute_name(TEMP_ID_KEY),
            item.id.as_str(),
        )
        .with_node_id(item.id.clone())
}

pub fn topbar(text: Option<&str>) -> VNode {
    VNode::element("div").with_class("topbar").with_child(
        VNode::element("div")
            .with_class("scroll")
            .with_child(VNode::text(text.unwrap_or_default())),
    )
}

pub fn carousel(items: &[Item]) -> VNode {
    let slides = items
        .iter()
        .map(|item| {
            let label = item.label().unwrap_or_default();
            item_container(item, "carousel__slide")
                .with_child(
                    VNode::element("div").with_class("image-wrapper").with_child(
                        VNode::element("img")
                            .with_class("image")
                            .with_attr("src", item.src().unwrap_or_default())
                            .with_attr("alt", label),
                    ),
                )
                .with_child(
                    VNode::element("p")
                        .with_class("label")
                        .with_child(VNode::text(label)),
                )
        })
        .collect();

    VNode::element("div").with_class("carousel").with_child(
        VNode::element("div")
            .with_class("carousel__container")
            .with_children(slides),
    )
}

pub fn banner(items: &[Item]) -> VNode {
    let tiles = items
        .iter()
        .map(|item| {
            let tile = item_container(item, "banner__item").with_child(
                VNode::element("img")
                    .with_attr("src", item.src().unwrap_or_default())
                    .with_attr("alt", "An image"),
            );
            match item.label() {
                Some(label) => tile.with_child(
                    VNode::element("p")
                        .with_class("label")
                        .with_child(VNode::text(label)),
                ),
                None => tile,
            }
        })
        .collect();

    VNode::element("div").with_class("banner").with_children(tiles)
}

pub fn heading(props: &HeadingProps<'_>) -> VNode {
    VNode::element("div")
        .with_class("heading")
        .with_styles(heading_style(props.fields))
        .with_child(VNode::element("h2").with_child(VNode::text(props.text.unwrap_or_default())))
}

/// Products of the matched collection; an unmatched section renders an empty track
pub fn product_carousel(collection: Option<&Collection>) -> VNode {
    let slides = collection
        .map(|c| c.products.iter().map(product_card).collect())
        .unwrap_or_default();

    VNode::element("div").with_class("product_carousel").with_child(
        VNode::element("div")
            .with_class("product_carousel__container")
            .with_children(slides),
    )
}

fn product_card(product: &Product) -> VNode {
    let mut image = VNode::element("img").with_class("product__image");
    if let Some(url) = &product.image_url {
        image = image.with_attr("src", url.as_str());
    }
    image = image.with_attr("alt", product.image_alt.as_deref().unwrap_or_default());

    VNode::element("div").with_class("product_carousel__slide").with_child(
        VNode::element("div")
            .with_class("product")
            .with_child(image)
            .with_child(VNode::element("p").with_child(VNode::text(product.title.as_str())))
            .with_child(
                VNode::element("p")
                    .with_class("product__price")
                    .with_child(VNode::text(product.price.as_deref().unwrap_or("N/A"))),
            ),
    )
}
