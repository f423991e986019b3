use std::fmt;

use super::Bvh;

/// Prints the tree as a Graphviz digraph.
impl fmt::Display for Bvh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph G {{")?;

        for (id, node) in self.nodes().iter().enumerate() {
            if node.is_leaf() {
                writeln!(
                    f,
                    "  n{} [label=\"leaf({})\"]",
                    id,
                    self.triangle_ids[node.primitive_id as usize]
                )?;
            } else {
                writeln!(
                    f,
                    "  n{} [label=\"node({} .. {})\"]",
                    id, node.bb_min, node.bb_max
                )?;

                writeln!(f, "  n{} -> n{} [label=\"on-hit\"]", id, id + 1)?;
            }

            if let Some(next) = self.next(id as u32) {
                writeln!(f, "  n{} -> n{} [label=\"on-miss\"]", id, next)?;
            }
        }

        writeln!(f, "}}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::TestMesh;
    use crate::Bvh;

    #[test]
    fn unit_square() {
        let bvh = Bvh::build(&TestMesh::unit_square().view());

        assert_eq!(
            "digraph G {\n\
             \x20 n0 [label=\"node([0, 0, 0] .. [1, 1, 0])\"]\n\
             \x20 n0 -> n1 [label=\"on-hit\"]\n\
             \x20 n1 [label=\"leaf(0)\"]\n\
             \x20 n1 -> n2 [label=\"on-miss\"]\n\
             \x20 n2 [label=\"leaf(1)\"]\n\
             }\n",
            bvh.to_string()
        );
    }

    #[test]
    fn empty() {
        assert_eq!("digraph G {\n}\n", Bvh::default().to_string());
    }
}
