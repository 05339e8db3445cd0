//! 四叉树节点
//!
//! 模拟引擎拥有节点图，渲染器只在一帧内只读地遍历它。
//! `Node` 是一个基于 `Arc` 共享子树的参考实现，供宿主与测试使用。

use crate::bounds::Bounds;
use crate::flex_int::FlexInt;
use crate::math::pow2;
use std::sync::Arc;

/// 渲染器消费的节点接口
pub trait QuadNode {
    /// 层级，叶子（单个细胞）为 0，边长为 `2^level`
    fn level(&self) -> u32;

    /// 子树中的活细胞数
    fn population(&self) -> &FlexInt;

    /// 按 `[nw, ne, sw, se]` 顺序返回子节点，叶子返回 `None`
    fn children(&self) -> Option<[&Self; 4]>;
}

#[derive(Debug, Clone)]
pub struct Node {
    level: u32,
    population: FlexInt,
    children: Option<[Arc<Node>; 4]>,
}

impl Node {
    /// 单细胞叶子
    pub fn leaf(alive: bool) -> Self {
        Self {
            level: 0,
            population: if alive { FlexInt::ONE } else { FlexInt::ZERO },
            children: None,
        }
    }

    /// 由四个同层子节点组成的内部节点
    pub fn branch(nw: Arc<Node>, ne: Arc<Node>, sw: Arc<Node>, se: Arc<Node>) -> Self {
        debug_assert!(
            nw.level == ne.level && nw.level == sw.level && nw.level == se.level,
            "quadrants must share a level"
        );
        let population: FlexInt = [&nw, &ne, &sw, &se]
            .iter()
            .map(|child| &child.population)
            .sum();
        Self {
            level: nw.level + 1,
            population,
            children: Some([nw, ne, sw, se]),
        }
    }

    /// 指定层级的空树，各层共享同一个子节点
    pub fn empty(level: u32) -> Arc<Node> {
        let mut node = Arc::new(Node::leaf(false));
        for _ in 0..level {
            node = Arc::new(Node::branch(
                node.clone(),
                node.clone(),
                node.clone(),
                node,
            ));
        }
        node
    }
}

impl QuadNode for Node {
    fn level(&self) -> u32 {
        self.level
    }

    fn population(&self) -> &FlexInt {
        &self.population
    }

    fn children(&self) -> Option<[&Self; 4]> {
        self.children
            .as_ref()
            .map(|[nw, ne, sw, se]| [&**nw, &**ne, &**sw, &**se])
    }
}

/// 计算根节点中活细胞的包含式边界
///
/// 根节点以宇宙原点为中心，覆盖 `[-2^(level-1), 2^(level-1))`。
pub fn root_bounds<N: QuadNode>(root: &N) -> Bounds {
    if root.population().is_zero() {
        return Bounds::empty();
    }

    let half = half_extent(root.level());
    let origin = -&half;

    // 从反向的边界开始收缩
    let mut bounds = Bounds::new(half.clone(), half.clone(), origin.clone(), origin.clone());
    collect_bounds(root, origin.clone(), origin, &mut bounds);
    bounds
}

fn half_extent(level: u32) -> FlexInt {
    match level {
        0 => FlexInt::ZERO,
        _ => FlexInt::from(pow2(level - 1)),
    }
}

fn collect_bounds<N: QuadNode>(node: &N, left: FlexInt, top: FlexInt, bounds: &mut Bounds) {
    if node.population().is_zero() {
        return;
    }

    if node.level() == 0 {
        bounds.include(&left, &top);
        return;
    }

    let Some([nw, ne, sw, se]) = node.children() else {
        return;
    };

    let size = FlexInt::from(pow2(node.level()));
    let far_x = &(&left + &size) - &FlexInt::ONE;
    let far_y = &(&top + &size) - &FlexInt::ONE;
    if left >= bounds.left && far_x <= bounds.right && top >= bounds.top && far_y <= bounds.bottom {
        // 整块已在找到的边界内
        return;
    }

    let half = half_extent(node.level());
    let mid_x = &left + &half;
    let mid_y = &top + &half;
    collect_bounds(nw, left.clone(), top.clone(), bounds);
    collect_bounds(ne, mid_x.clone(), top, bounds);
    collect_bounds(sw, left, mid_y.clone(), bounds);
    collect_bounds(se, mid_x, mid_y, bounds);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alive() -> Arc<Node> {
        Arc::new(Node::leaf(true))
    }

    fn dead() -> Arc<Node> {
        Arc::new(Node::leaf(false))
    }

    #[test]
    fn test_branch_population_and_level() {
        let node = Node::branch(alive(), dead(), alive(), alive());
        assert_eq!(node.level(), 1);
        assert_eq!(*node.population(), FlexInt::from(3));
        assert!(node.children().is_some());
        assert!(Node::leaf(true).children().is_none());
    }

    #[test]
    fn test_empty_tree_is_shared() {
        let node = Node::empty(300);
        assert_eq!(node.level(), 300);
        assert!(node.population().is_zero());
        assert_eq!(root_bounds(&*node), Bounds::empty());
    }

    #[test]
    fn test_root_bounds_level_two() {
        // 4x4 宇宙覆盖 [-2, 2)，在 ne 象限的 sw 位置放一个细胞
        let ne = Arc::new(Node::branch(dead(), dead(), alive(), dead()));
        let nw = Arc::new(Node::branch(dead(), dead(), dead(), alive()));
        let empty = Node::empty(1);
        let root = Node::branch(nw, ne, empty.clone(), empty);

        let bounds = root_bounds(&root);
        assert_eq!(bounds.left, FlexInt::from(-1));
        assert_eq!(bounds.right, FlexInt::from(0));
        assert_eq!(bounds.top, FlexInt::from(-1));
        assert_eq!(bounds.bottom, FlexInt::from(-1));
        assert_eq!(bounds.width(), FlexInt::from(2));
    }
}
