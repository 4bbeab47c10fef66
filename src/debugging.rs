use dot::{Edges, GraphWalk, Labeller, Nodes};

use crate::types::{EdgeType, NIL};

type Node = usize;

#[derive(Debug, Clone)]
struct Edge {
    id: usize,
    source: Node,
    target: Node,
    edge_type: EdgeType,
}

struct EngineView<'a> {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    label: &'a [usize],
    lowpoint: &'a [usize],
    least_ancestor: &'a [usize],
    parent: &'a [usize],
}

impl<'a> Labeller<'a, Node, Edge> for EngineView<'a> {
    fn graph_id(&self) -> dot::Id<'_> {
        dot::Id::new("G").unwrap()
    }

    fn node_id(&self, n: &Node) -> dot::Id<'_> {
        dot::Id::new(format!("N{}", n)).unwrap()
    }

    fn node_label(&self, n: &Node) -> dot::LabelText<'a> {
        let fmt_nil = |x: usize| {
            if x == NIL { "-".to_string() } else { x.to_string() }
        };
        dot::LabelText::label(format!(
            "{}\ndfi:{}\nlp:{} la:{}\np:{}",
            fmt_nil(self.label[*n]),
            n,
            fmt_nil(self.lowpoint[*n]),
            fmt_nil(self.least_ancestor[*n]),
            fmt_nil(self.parent[*n]),
        ))
    }

    fn edge_label(&self, e: &Edge) -> dot::LabelText<'a> {
        dot::LabelText::label(format!("{} {:?}", e.id, e.edge_type))
    }
}

impl<'a> GraphWalk<'a, Node, Edge> for EngineView<'a> {
    fn nodes(&self) -> Nodes<'_, Node> {
        self.nodes.iter().cloned().collect()
    }

    fn edges(&self) -> Edges<'_, Edge> {
        self.edges.as_slice().into()
    }

    fn source(&self, e: &Edge) -> Node {
        e.source
    }

    fn target(&self, e: &Edge) -> Node {
        e.target
    }
}

/// Renders the engine state in DOT format with the DFS annotations the
/// Walkup and Walkdown run on. Virtual endpoints are mapped back to their
/// DFS children so the picture stays within the real vertices.
pub fn draw_state(g: &crate::graph::Graph) -> String {
    let n = g.order();
    let real = |v: usize| if v >= n { v - n } else { v };

    let mut view = EngineView {
        nodes: (0..n).collect(),
        edges: Vec::new(),
        label: &g.label,
        lowpoint: &g.lowpoint,
        least_ancestor: &g.least_ancestor,
        parent: &g.parent,
    };

    for k in 0..g.size() {
        let j = 2 * k;
        view.edges.push(Edge {
            id: k,
            source: real(g.neighbor[g.twin(j)]),
            target: real(g.neighbor[j]),
            edge_type: g.edge_type[j],
        });
    }

    let mut buffer = std::io::Cursor::new(Vec::new());
    dot::render(&view, &mut buffer).unwrap();
    String::from_utf8(buffer.into_inner()).unwrap()
}
