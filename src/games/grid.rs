//! Drill-down grid picker over a static category tree.
//!
//! The tree renders as a 3x3 grid: eight cells around a center. Picking a
//! branch zooms into its children, the center cell draws a uniform random
//! leaf from the current subtree, and picking a leaf is the final choice.
//! Navigation is a path of node ids, so the picker itself is stateless.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::GameError;

#[derive(Debug)]
pub struct CategoryNode {
    pub id: &'static str,
    pub label: &'static str,
    pub children: &'static [CategoryNode],
}

impl CategoryNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

macro_rules! leaves {
    ($(($id:literal, $label:literal)),* $(,)?) => {
        &[$(CategoryNode { id: $id, label: $label, children: &[] }),*]
    };
}

/// Eight top-level categories, eight dishes each.
pub static CATEGORY_TREE: &[CategoryNode] = &[
    CategoryNode {
        id: "korean",
        label: "Korean",
        children: leaves![
            ("kimchi_stew", "Kimchi Stew"),
            ("bibimbap", "Bibimbap"),
            ("bulgogi", "Bulgogi"),
            ("samgyeopsal", "Samgyeopsal"),
            ("tteokbokki", "Tteokbokki"),
            ("gimbap", "Gimbap"),
            ("cold_noodles", "Cold Noodles"),
            ("soybean_stew", "Soybean Paste Stew"),
        ],
    },
    CategoryNode {
        id: "chinese",
        label: "Chinese",
        children: leaves![
            ("jajangmyeon", "Jajangmyeon"),
            ("jjamppong", "Jjamppong"),
            ("sweet_sour_pork", "Sweet and Sour Pork"),
            ("mala_soup", "Mala Soup"),
            ("fried_rice", "Fried Rice"),
            ("dumplings", "Dumplings"),
            ("hot_pot", "Hot Pot"),
            ("mapo_tofu", "Mapo Tofu"),
        ],
    },
    CategoryNode {
        id: "japanese",
        label: "Japanese",
        children: leaves![
            ("sushi", "Sushi"),
            ("ramen", "Ramen"),
            ("udon", "Udon"),
            ("donkatsu", "Donkatsu"),
            ("curry_rice", "Curry Rice"),
            ("soba", "Soba"),
            ("onigiri", "Onigiri"),
            ("takoyaki", "Takoyaki"),
        ],
    },
    CategoryNode {
        id: "western",
        label: "Western",
        children: leaves![
            ("pizza", "Pizza"),
            ("pasta", "Pasta"),
            ("steak", "Steak"),
            ("risotto", "Risotto"),
            ("lasagna", "Lasagna"),
            ("paella", "Paella"),
            ("schnitzel", "Schnitzel"),
            ("fish_and_chips", "Fish and Chips"),
        ],
    },
    CategoryNode {
        id: "fastfood",
        label: "Fast food",
        children: leaves![
            ("burger", "Burger"),
            ("fried_chicken", "Fried Chicken"),
            ("sandwich", "Sandwich"),
            ("burrito", "Burrito"),
            ("hot_dog", "Hot Dog"),
            ("kebab", "Kebab"),
            ("fries", "Loaded Fries"),
            ("corn_dog", "Corn Dog"),
        ],
    },
    CategoryNode {
        id: "asian",
        label: "Southeast Asian",
        children: leaves![
            ("pho", "Pho"),
            ("pad_thai", "Pad Thai"),
            ("banh_mi", "Banh Mi"),
            ("nasi_goreng", "Nasi Goreng"),
            ("tom_yum", "Tom Yum"),
            ("satay", "Satay"),
            ("laksa", "Laksa"),
            ("spring_rolls", "Spring Rolls"),
        ],
    },
    CategoryNode {
        id: "healthy",
        label: "Light & Healthy",
        children: leaves![
            ("salad", "Salad"),
            ("poke_bowl", "Poke Bowl"),
            ("smoothie_bowl", "Smoothie Bowl"),
            ("wrap", "Veggie Wrap"),
            ("soup", "Vegetable Soup"),
            ("grilled_chicken", "Grilled Chicken"),
            ("quinoa_bowl", "Quinoa Bowl"),
            ("avocado_toast", "Avocado Toast"),
        ],
    },
    CategoryNode {
        id: "dessert",
        label: "Dessert",
        children: leaves![
            ("waffles", "Waffles"),
            ("tiramisu", "Tiramisu"),
            ("bingsu", "Bingsu"),
            ("macarons", "Macarons"),
            ("cheesecake", "Cheesecake"),
            ("ice_cream", "Ice Cream"),
            ("croissant", "Croissant"),
            ("brownie", "Brownie"),
        ],
    },
];

/// One cell of the 3x3 projection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridCell {
    pub id: String,
    pub label: String,
    pub is_leaf: bool,
    pub is_center: bool,
}

/// Follow a path of node ids from the root. Fails on unknown ids or on
/// descending past a leaf.
pub fn resolve_path(path: &[String]) -> Result<&'static [CategoryNode], GameError> {
    let mut nodes = CATEGORY_TREE;
    for id in path {
        let node = nodes
            .iter()
            .find(|n| n.id == *id)
            .ok_or(GameError::InvalidInput("unknown category"))?;
        if node.is_leaf() {
            return Err(GameError::InvalidInput("cannot descend into a dish"));
        }
        nodes = node.children;
    }
    Ok(nodes)
}

/// Project the current level onto the 3x3 grid: eight nodes around a
/// random-pick center cell.
pub fn cells(path: &[String]) -> Result<Vec<GridCell>, GameError> {
    let nodes = resolve_path(path)?;

    let mut cells: Vec<GridCell> = Vec::with_capacity(9);
    for node in nodes.iter().take(4) {
        cells.push(cell_of(node));
    }
    cells.push(GridCell {
        id: "center".to_string(),
        label: "Surprise me".to_string(),
        is_leaf: false,
        is_center: true,
    });
    for node in nodes.iter().skip(4).take(4) {
        cells.push(cell_of(node));
    }
    Ok(cells)
}

fn cell_of(node: &CategoryNode) -> GridCell {
    GridCell {
        id: node.id.to_string(),
        label: node.label.to_string(),
        is_leaf: node.is_leaf(),
        is_center: false,
    }
}

/// Resolve a picked cell id at the given path: a leaf id is the final
/// choice, "center" draws a random leaf from the current subtree.
pub fn pick<R: Rng + ?Sized>(
    path: &[String],
    cell_id: &str,
    rng: &mut R,
) -> Result<PickOutcome, GameError> {
    let nodes = resolve_path(path)?;

    if cell_id == "center" {
        let leaves = collect_leaves(nodes);
        let label = leaves[rng.random_range(0..leaves.len())];
        return Ok(PickOutcome::Final(label.to_string()));
    }

    let node = nodes
        .iter()
        .find(|n| n.id == cell_id)
        .ok_or(GameError::InvalidInput("unknown category"))?;

    if node.is_leaf() {
        Ok(PickOutcome::Final(node.label.to_string()))
    } else {
        Ok(PickOutcome::Descend(node.id.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    /// Zoom into this branch
    Descend(String),
    /// The menu is decided
    Final(String),
}

fn collect_leaves(nodes: &'static [CategoryNode]) -> Vec<&'static str> {
    let mut leaves = Vec::new();
    for node in nodes {
        if node.is_leaf() {
            leaves.push(node.label);
        } else {
            leaves.extend(collect_leaves(node.children));
        }
    }
    leaves
}
