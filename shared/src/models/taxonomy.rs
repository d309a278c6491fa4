//! Category Taxonomy
//!
//! Read-only category → subcategory → qualifier tree used to browse the
//! inventory. Nodes are an explicit sum type: a [`TaxonomyNode::Category`]
//! owns a (possibly empty) level of children, a [`TaxonomyNode::Leaf`] is a
//! terminal qualifier such as "Feminina".
//!
//! Levels are shared `Arc<[TaxonomyNode]>` slices so that a navigation
//! stack can hold the exact `children` level of a category and later find
//! that category again by pointer identity.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One level of the taxonomy (the children of a category, or the root)
pub type Level = Arc<[TaxonomyNode]>;

/// Category node with its children level
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub id: String,
    pub name: String,
    pub children: Level,
}

impl CategoryNode {
    /// A category can be drilled into only when it has at least one child.
    /// An empty children level behaves exactly like a leaf.
    pub fn is_drillable(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Terminal qualifier (gender, length, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxonomyLeaf {
    pub id: String,
    pub name: String,
}

impl TaxonomyLeaf {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Taxonomy node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum TaxonomyNode {
    Category(CategoryNode),
    Leaf(TaxonomyLeaf),
}

impl TaxonomyNode {
    pub fn category(
        id: impl Into<String>,
        name: impl Into<String>,
        children: impl IntoIterator<Item = TaxonomyNode>,
    ) -> Self {
        TaxonomyNode::Category(CategoryNode {
            id: id.into(),
            name: name.into(),
            children: children.into_iter().collect(),
        })
    }

    pub fn leaf(id: impl Into<String>, name: impl Into<String>) -> Self {
        TaxonomyNode::Leaf(TaxonomyLeaf::new(id, name))
    }

    pub fn id(&self) -> &str {
        match self {
            TaxonomyNode::Category(c) => &c.id,
            TaxonomyNode::Leaf(l) => &l.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TaxonomyNode::Category(c) => &c.name,
            TaxonomyNode::Leaf(l) => &l.name,
        }
    }

    /// Children level, `None` for leaves
    pub fn children(&self) -> Option<&Level> {
        match self {
            TaxonomyNode::Category(c) => Some(&c.children),
            TaxonomyNode::Leaf(_) => None,
        }
    }

    /// Children level only when it is non-empty
    pub fn drill_level(&self) -> Option<&Level> {
        match self {
            TaxonomyNode::Category(c) if c.is_drillable() => Some(&c.children),
            _ => None,
        }
    }

    /// Identity of this node as a terminal qualifier
    pub fn to_leaf(&self) -> TaxonomyLeaf {
        TaxonomyLeaf::new(self.id(), self.name())
    }
}

/// Wire shape `{ id, name, children? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawNode {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<RawNode>>,
}

impl From<RawNode> for TaxonomyNode {
    fn from(raw: RawNode) -> Self {
        match raw.children {
            Some(children) => TaxonomyNode::category(
                raw.id,
                raw.name,
                children.into_iter().map(TaxonomyNode::from),
            ),
            None => TaxonomyNode::leaf(raw.id, raw.name),
        }
    }
}

impl From<TaxonomyNode> for RawNode {
    fn from(node: TaxonomyNode) -> Self {
        match node {
            TaxonomyNode::Category(c) => RawNode {
                id: c.id,
                name: c.name,
                children: Some(c.children.iter().cloned().map(RawNode::from).collect()),
            },
            TaxonomyNode::Leaf(l) => RawNode {
                id: l.id,
                name: l.name,
                children: None,
            },
        }
    }
}

/// The full category tree
///
/// Constructed once and injected wherever navigation happens; it is never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TaxonomyNode>", into = "Vec<TaxonomyNode>")]
pub struct Taxonomy {
    root: Level,
}

impl From<Vec<TaxonomyNode>> for Taxonomy {
    fn from(nodes: Vec<TaxonomyNode>) -> Self {
        Self::new(nodes)
    }
}

impl From<Taxonomy> for Vec<TaxonomyNode> {
    fn from(taxonomy: Taxonomy) -> Self {
        taxonomy.root.to_vec()
    }
}

impl Taxonomy {
    pub fn new(roots: impl IntoIterator<Item = TaxonomyNode>) -> Self {
        Self {
            root: roots.into_iter().collect(),
        }
    }

    /// Parse a taxonomy from its JSON form (array of `{ id, name, children? }`)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Root level
    pub fn root(&self) -> &Level {
        &self.root
    }

    /// Depth-first lookup by id
    pub fn find(&self, id: &str) -> Option<&TaxonomyNode> {
        fn walk<'a>(level: &'a [TaxonomyNode], id: &str) -> Option<&'a TaxonomyNode> {
            for node in level {
                if node.id() == id {
                    return Some(node);
                }
                if let Some(found) = node.children().and_then(|c| walk(c, id)) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.root, id)
    }

    /// Ordered chain of nodes from the root down to (and including) `id`
    pub fn path_to(&self, id: &str) -> Option<Vec<TaxonomyNode>> {
        fn walk(level: &[TaxonomyNode], id: &str, trail: &mut Vec<TaxonomyNode>) -> bool {
            for node in level {
                trail.push(node.clone());
                if node.id() == id {
                    return true;
                }
                if let Some(children) = node.children()
                    && walk(children, id, trail)
                {
                    return true;
                }
                trail.pop();
            }
            false
        }

        let mut trail = Vec::new();
        walk(&self.root, id, &mut trail).then_some(trail)
    }

    /// Standard taxonomy of the shop
    pub fn brecho_default() -> Self {
        use TaxonomyNode as N;

        let genders = |f: &str, m: &str| [N::leaf(f, "Feminina"), N::leaf(m, "Masculina")];

        Self::new([
            N::category(
                "cat-001",
                "Camisas",
                [
                    N::category("subcat-001", "Camiseta", genders("subsubcat-001", "subsubcat-002")),
                    N::category(
                        "subcat-002",
                        "Camisa Social",
                        genders("subsubcat-003", "subsubcat-004"),
                    ),
                    N::category("subcat-003", "Regata", genders("subsubcat-005", "subsubcat-006")),
                ],
            ),
            N::category(
                "cat-002",
                "Calças",
                [
                    N::category("subcat-004", "Jeans", genders("subsubcat-007", "subsubcat-008")),
                    N::category("subcat-005", "Moletom", genders("subsubcat-009", "subsubcat-010")),
                    N::leaf("subcat-006", "Legging"),
                ],
            ),
            N::category(
                "cat-003",
                "Vestidos",
                [N::leaf("subcat-007", "Longo"), N::leaf("subcat-008", "Curto")],
            ),
            N::category(
                "cat-004",
                "Casacos",
                [
                    N::category("subcat-009", "Jaqueta", genders("subsubcat-011", "subsubcat-012")),
                    N::category("subcat-010", "Blazer", genders("subsubcat-013", "subsubcat-014")),
                ],
            ),
            N::category(
                "cat-005",
                "Acessórios",
                [N::leaf("subcat-011", "Bolsas"), N::leaf("subcat-012", "Cintos")],
            ),
        ])
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::brecho_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_id() {
        let taxonomy = Taxonomy::brecho_default();
        assert_eq!(taxonomy.find("cat-001").map(TaxonomyNode::name), Some("Camisas"));
        assert_eq!(taxonomy.find("subsubcat-001").map(TaxonomyNode::name), Some("Feminina"));
        assert!(taxonomy.find("nope").is_none());
    }

    #[test]
    fn test_path_to_leaf() {
        let taxonomy = Taxonomy::brecho_default();
        let path = taxonomy.path_to("subsubcat-001").unwrap();
        let ids: Vec<&str> = path.iter().map(TaxonomyNode::id).collect();
        assert_eq!(ids, ["cat-001", "subcat-001", "subsubcat-001"]);

        let path = taxonomy.path_to("subcat-006").unwrap();
        let ids: Vec<&str> = path.iter().map(TaxonomyNode::id).collect();
        assert_eq!(ids, ["cat-002", "subcat-006"]);

        assert!(taxonomy.path_to("missing").is_none());
    }

    #[test]
    fn test_empty_children_is_not_drillable() {
        let node = TaxonomyNode::category("cat-x", "Vazia", []);
        assert!(node.children().is_some());
        assert!(node.drill_level().is_none());
        assert!(TaxonomyNode::leaf("l", "Leaf").drill_level().is_none());
    }

    #[test]
    fn test_json_shape() {
        let json = r#"[
            {"id": "cat-1", "name": "Camisas", "children": [
                {"id": "sub-1", "name": "Camiseta", "children": [
                    {"id": "g-1", "name": "Feminina"}
                ]},
                {"id": "sub-2", "name": "Polo", "children": []}
            ]}
        ]"#;
        let taxonomy = Taxonomy::from_json(json).unwrap();

        let camisas = &taxonomy.root()[0];
        assert!(matches!(camisas, TaxonomyNode::Category(_)));
        let sub = camisas.children().unwrap();
        assert!(matches!(sub[0].children().unwrap()[0], TaxonomyNode::Leaf(_)));
        // explicit empty list stays a category, but it is not drillable
        assert!(sub[1].children().is_some_and(|c| c.is_empty()));

        let back = serde_json::to_value(&taxonomy).unwrap();
        assert_eq!(back[0]["children"][0]["children"][0]["id"], "g-1");
        assert!(back[0]["children"][0]["children"][0].get("children").is_none());
    }
}
