use cfgm_core::Edge;
use cfgm_graph::{render_diagram, DiagramOptions};

fn path_edges() -> Vec<Edge<&'static str>> {
    [
        ("a", "b"),
        ("a", "d"),
        ("b", "c"),
        ("c", "f"),
        ("d", "e"),
        ("e", "f"),
        ("e", "f"),
        ("f", "g"),
        ("f", "h"),
    ]
    .into_iter()
    .map(Edge::from)
    .collect()
}

#[test]
fn renders_one_line_per_pair() {
    let rendered = render_diagram(&path_edges(), DiagramOptions::default());
    let expected = "a -- b\n\
                    a -- d\n\
                    b -- c\n\
                    c -- f\n\
                    d -- e\n\
                    e -- f : 2 {style: {font-size: 24; bold: true}}\n\
                    f -- g\n\
                    f -- h\n";
    assert_eq!(rendered, expected);
}

#[test]
fn horizontal_layout_adds_direction() {
    let rendered = render_diagram(&[Edge::new(1, 2)], DiagramOptions { horizontal: true });
    assert_eq!(rendered, "direction: right\n\n1 -- 2\n");
}

#[test]
fn reversed_pairs_merge_into_first_orientation() {
    let edges = vec![Edge::new("y", "x"), Edge::new("z", "y"), Edge::new("x", "y")];
    let rendered = render_diagram(&edges, DiagramOptions::default());
    assert_eq!(
        rendered,
        "y -- x : 2 {style: {font-size: 24; bold: true}}\nz -- y\n"
    );
    assert_eq!(rendered, render_diagram(&edges, DiagramOptions::default()));
}

#[test]
fn empty_edge_list_renders_nothing() {
    let edges: Vec<Edge<u32>> = Vec::new();
    assert_eq!(render_diagram(&edges, DiagramOptions::default()), "");
}
