//! Node Construction - building VNodes and comparing their identity.
//!
//! # Example
//!
//! ```
//! use spark_vdom::{create_vnode, props, ShapeFlags};
//!
//! let list = create_vnode(
//!     "ul",
//!     Some(props! { "class" => "todo" }),
//!     vec![
//!         create_vnode("li", Some(props! { "key" => 1 }), "first"),
//!         create_vnode("li", Some(props! { "key" => 2 }), "second"),
//!     ],
//! );
//!
//! assert!(list.shape_flag().contains(ShapeFlags::ELEMENT | ShapeFlags::ARRAY_CHILDREN));
//! ```

use super::node::{Children, VNode, VNodeType};
use crate::types::Props;

/// Build a VNode from a type, an optional property bag and children.
///
/// The key is taken from `props["key"]`. Children convert through
/// [`Children`]: sequences of VNodes become array children, everything else
/// is coerced to text, and `()` / `None` / `""` mean no children.
pub fn create_vnode(
    node_type: impl Into<VNodeType>,
    props: Option<Props>,
    children: impl Into<Children>,
) -> VNode {
    let key = props.as_ref().and_then(Props::key);
    VNode::from_parts(node_type.into(), props, children.into(), key)
}

/// Build a bare text node.
pub fn text_vnode(content: impl Into<String>) -> VNode {
    VNode::from_parts(VNodeType::Text, None, Children::Text(content.into()), None)
}

/// Two VNodes are the same logical node iff their type and key are equal.
///
/// This is the only identity predicate the reconciler uses.
#[inline]
pub fn is_same_vnode(a: &VNode, b: &VNode) -> bool {
    a.node_type() == b.node_type() && a.key() == b.key()
}

// Child normalization: plain text inside a child list becomes a text node.
impl From<&str> for VNode {
    fn from(content: &str) -> Self {
        text_vnode(content)
    }
}

impl From<String> for VNode {
    fn from(content: String) -> Self {
        text_vnode(content)
    }
}

/// Build a [`Props`] bag from `name => value` pairs.
///
/// ```
/// use spark_vdom::props;
///
/// let props = props! { "id" => "main", "key" => 7, "hidden" => false };
/// assert_eq!(props.len(), 3);
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Props::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::Props::new()$(.with($name, $value))+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Key, ShapeFlags};

    #[test]
    fn test_element_with_text_children() {
        let vnode = create_vnode("p", None, "hello");

        assert_eq!(vnode.tag(), Some("p"));
        assert_eq!(vnode.children().as_text(), Some("hello"));
        assert_eq!(vnode.shape_flag(), ShapeFlags::ELEMENT | ShapeFlags::TEXT_CHILDREN);
        assert!(vnode.key().is_none());
        assert!(!vnode.is_mounted());
    }

    #[test]
    fn test_array_children_flag() {
        let vnode = create_vnode("ul", None, vec![create_vnode("li", None, ())]);

        assert_eq!(vnode.shape_flag(), ShapeFlags::ELEMENT | ShapeFlags::ARRAY_CHILDREN);
        assert_eq!(vnode.children().as_nodes().map(<[VNode]>::len), Some(1));
    }

    #[test]
    fn test_empty_vec_is_still_array_children() {
        let vnode = create_vnode("ul", None, Vec::new());
        assert!(vnode.shape_flag().contains(ShapeFlags::ARRAY_CHILDREN));
    }

    #[test]
    fn test_no_children() {
        let vnode = create_vnode("br", None, ());
        assert_eq!(vnode.shape_flag(), ShapeFlags::ELEMENT);
        assert!(vnode.children().is_none());

        // Empty text carries no children
        let empty = create_vnode("span", None, "");
        assert!(empty.children().is_none());
    }

    #[test]
    fn test_text_coercion() {
        let vnode = create_vnode("span", None, 42);
        assert_eq!(vnode.children().as_text(), Some("42"));

        let vnode = create_vnode("span", None, Some(true));
        assert_eq!(vnode.children().as_text(), Some("true"));
    }

    #[test]
    fn test_key_from_props() {
        let vnode = create_vnode("li", Some(props! { "key" => "a", "class" => "row" }), ());
        assert_eq!(vnode.key(), Some(&Key::from("a")));

        let keyless = create_vnode("li", Some(props! { "class" => "row" }), ());
        assert_eq!(keyless.key(), None);
    }

    #[test]
    fn test_text_vnode() {
        let vnode = text_vnode("x");
        assert!(!vnode.node_type().is_element());
        assert_eq!(vnode.shape_flag(), ShapeFlags::TEXT_CHILDREN);

        let normalized: VNode = "y".into();
        assert_eq!(normalized.children().as_text(), Some("y"));
    }

    #[test]
    fn test_is_same_vnode() {
        let a = create_vnode("li", Some(props! { "key" => 1 }), "one");
        let b = create_vnode("li", Some(props! { "key" => 1 }), "uno");
        let c = create_vnode("li", Some(props! { "key" => 2 }), "one");
        let d = create_vnode("div", Some(props! { "key" => 1 }), "one");

        assert!(is_same_vnode(&a, &b));
        assert!(!is_same_vnode(&a, &c));
        assert!(!is_same_vnode(&a, &d));

        // Both keyless compares by type only
        assert!(is_same_vnode(&create_vnode("p", None, ()), &create_vnode("p", None, "x")));
        assert!(!is_same_vnode(&text_vnode("p"), &create_vnode("p", None, ())));
    }

    #[test]
    fn test_clone_preserves_identity() {
        let vnode = create_vnode("div", None, ());
        let copy = vnode.clone();
        assert!(vnode.ptr_eq(&copy));
        assert!(!vnode.ptr_eq(&create_vnode("div", None, ())));
    }
}
