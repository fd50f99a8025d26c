//! Linear static analysis of plane frames by the direct stiffness
//! method.
//!
//! Every node has three degrees of freedom (ux, uy, rz). Members are
//! Euler-Bernoulli beam-columns rigidly connected at both ends.

use crate::COMMENT;
use log::info;
use nalgebra::{DMatrix, DVector, Matrix6, Vector6};

/// Degrees of freedom per node.
const DOF: usize = 3;

#[derive(Debug, Clone)]
struct Node {
    name: String,
    x: f64,
    y: f64,
    /// restrained ux, uy, rz
    support: [bool; DOF],
    /// applied Fx, Fy, Mz
    load: [f64; DOF],
}

#[derive(Debug, Clone)]
struct Member {
    name: String,
    start: usize,
    end: usize,
    elastic_modulus: f64,
    area: f64,
    inertia: f64,
}

/// A plane frame model.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    nodes: Vec<Node>,
    members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeResult {
    pub name: String,
    /// ux, uy (m) and rz (rad)
    pub displacement: [f64; DOF],
    /// support reaction Fx, Fy (N) and Mz (N m), zero on free DOFs
    pub reaction: [f64; DOF],
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberResult {
    pub name: String,
    /// axial force, tension positive (N)
    pub axial_force: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameResult {
    pub nodes: Vec<NodeResult>,
    pub members: Vec<MemberResult>,
}

impl FrameResult {
    pub fn node(&self, name: &str) -> Option<&NodeResult> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn member(&self, name: &str) -> Option<&MemberResult> {
        self.members.iter().find(|m| m.name == name)
    }
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    fn node_index(&self, name: &str) -> Result<usize, String> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .ok_or_else(|| format!("unknown node '{}'", name))
    }

    pub fn add_node(&mut self, name: &str, x: f64, y: f64) -> Result<(), String> {
        if self.node_index(name).is_ok() {
            return Err(format!("node '{}' already exists", name));
        }
        self.nodes.push(Node {
            name: name.to_string(),
            x,
            y,
            support: [false; DOF],
            load: [0.0; DOF],
        });
        Ok(())
    }

    pub fn add_member(
        &mut self,
        name: &str,
        start: &str,
        end: &str,
        elastic_modulus: f64,
        area: f64,
        inertia: f64,
    ) -> Result<(), String> {
        let start = self.node_index(start)?;
        let end = self.node_index(end)?;
        if !(elastic_modulus > 0.0 && area > 0.0 && inertia > 0.0) {
            return Err(format!(
                "member '{}' needs positive E ({}), A ({}) and I ({})",
                name, elastic_modulus, area, inertia
            ));
        }
        self.members.push(Member {
            name: name.to_string(),
            start,
            end,
            elastic_modulus,
            area,
            inertia,
        });
        Ok(())
    }

    /// Restrain the node's ux, uy and rz where the flag is true.
    pub fn set_support(&mut self, name: &str, support: [bool; DOF]) -> Result<(), String> {
        let i = self.node_index(name)?;
        self.nodes[i].support = support;
        Ok(())
    }

    /// Add Fx, Fy and Mz to the loads already on the node.
    pub fn add_load(&mut self, name: &str, load: [f64; DOF]) -> Result<(), String> {
        let i = self.node_index(name)?;
        for (total, extra) in self.nodes[i].load.iter_mut().zip(load.iter()) {
            *total += extra;
        }
        Ok(())
    }

    /// Length and direction cosines of a member.
    fn geometry(&self, member: &Member) -> Result<(f64, f64, f64), String> {
        let (a, b) = (&self.nodes[member.start], &self.nodes[member.end]);
        let length = (b.x - a.x).hypot(b.y - a.y);
        if length <= 0.0 {
            return Err(format!("member '{}' has zero length", member.name));
        }
        Ok((length, (b.x - a.x) / length, (b.y - a.y) / length))
    }

    /// Global DOF numbers of the two member ends.
    fn member_dofs(member: &Member) -> [usize; 2 * DOF] {
        let (s, e) = (member.start * DOF, member.end * DOF);
        [s, s + 1, s + 2, e, e + 1, e + 2]
    }

    fn global_stiffness(&self, member: &Member) -> Result<Matrix6<f64>, String> {
        let (length, c, s) = self.geometry(member)?;
        let local = local_stiffness(member.elastic_modulus, member.area, member.inertia, length);
        let t = rotation(c, s);
        Ok(t.transpose() * local * t)
    }

    pub fn analyse(&self) -> Result<FrameResult, String> {
        let n = self.nodes.len() * DOF;
        let mut k = DMatrix::<f64>::zeros(n, n);

        for member in &self.members {
            let km = self.global_stiffness(member)?;
            let dofs = Self::member_dofs(member);
            for (r, &gr) in dofs.iter().enumerate() {
                for (c, &gc) in dofs.iter().enumerate() {
                    k[(gr, gc)] += km[(r, c)];
                }
            }
        }

        let f = DVector::from_iterator(n, self.nodes.iter().flat_map(|node| node.load.iter().cloned()));
        let free: Vec<usize> = self
            .nodes
            .iter()
            .flat_map(|node| node.support.iter().cloned())
            .enumerate()
            .filter(|(_, fixed)| !fixed)
            .map(|(dof, _)| dof)
            .collect();

        let mut u = DVector::<f64>::zeros(n);
        if !free.is_empty() {
            let k_ff = DMatrix::from_fn(free.len(), free.len(), |r, c| k[(free[r], free[c])]);
            let f_f = DVector::from_fn(free.len(), |r, _| f[free[r]]);
            let u_f = k_ff
                .lu()
                .solve(&f_f)
                .ok_or_else(|| "frame is a mechanism, check the supports".to_string())?;
            if u_f.iter().any(|v| !v.is_finite()) {
                return Err("frame is a mechanism, check the supports".to_string());
            }
            for (r, &dof) in free.iter().enumerate() {
                u[dof] = u_f[r];
            }
        }

        let reactions = &k * &u - &f;

        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let mut displacement = [0.0; DOF];
                let mut reaction = [0.0; DOF];
                for d in 0..DOF {
                    displacement[d] = u[i * DOF + d];
                    if node.support[d] {
                        reaction[d] = reactions[i * DOF + d];
                    }
                }
                NodeResult {
                    name: node.name.clone(),
                    displacement,
                    reaction,
                }
            })
            .collect();

        let members = self
            .members
            .iter()
            .map(|member| -> Result<MemberResult, String> {
                let (length, c, s) = self.geometry(member)?;
                let dofs = Self::member_dofs(member);
                let axial_start = c * u[dofs[0]] + s * u[dofs[1]];
                let axial_end = c * u[dofs[3]] + s * u[dofs[4]];
                Ok(MemberResult {
                    name: member.name.clone(),
                    axial_force: member.elastic_modulus * member.area / length
                        * (axial_end - axial_start),
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        info!(
            "Solved frame with {} nodes, {} members and {} free DOFs",
            self.nodes.len(),
            self.members.len(),
            free.len()
        );

        Ok(FrameResult { nodes, members })
    }
}

/// Stiffness of a beam-column in its own axes (u1, v1, r1, u2, v2, r2).
fn local_stiffness(e: f64, a: f64, i: f64, l: f64) -> Matrix6<f64> {
    let ea = e * a / l;
    let ei = e * i;
    let k1 = 12.0 * ei / l.powi(3);
    let k2 = 6.0 * ei / l.powi(2);
    let k3 = 4.0 * ei / l;
    let k4 = 2.0 * ei / l;

    let rows = [
        [ea, 0.0, 0.0, -ea, 0.0, 0.0],
        [0.0, k1, k2, 0.0, -k1, k2],
        [0.0, k2, k3, 0.0, -k2, k4],
        [-ea, 0.0, 0.0, ea, 0.0, 0.0],
        [0.0, -k1, -k2, 0.0, k1, -k2],
        [0.0, k2, k4, 0.0, -k2, k3],
    ];
    Matrix6::from_fn(|r, c| rows[r][c])
}

/// Global to local transformation for direction cosines (c, s).
fn rotation(c: f64, s: f64) -> Matrix6<f64> {
    let mut t = Matrix6::zeros();
    for block in 0..2 {
        let o = block * DOF;
        t[(o, o)] = c;
        t[(o, o + 1)] = s;
        t[(o + 1, o)] = -s;
        t[(o + 1, o + 1)] = c;
        t[(o + 2, o + 2)] = 1.0;
    }
    t
}

/// Local end displacements, for checking member deformations.
#[cfg(test)]
fn to_local(c: f64, s: f64, global: &Vector6<f64>) -> Vector6<f64> {
    rotation(c, s) * global
}

/// The two member steel bracket: a post N1-N2 and an arm N2-N3,
/// pinned at N1 and N3 with 1 kN down at the knee.
pub fn default_frame() -> Result<Frame, String> {
    let steel = 210e9;
    let mut frame = Frame::new();
    frame.add_node("N1", 0.0, 0.0)?;
    frame.add_node("N2", 0.0, 10.0)?;
    frame.add_node("N3", 5.0, 10.0)?;
    frame.add_member("M1", "N1", "N2", steel, 0.01, 0.01)?;
    frame.add_member("M2", "N2", "N3", steel, 0.01, 0.01)?;
    frame.set_support("N1", [true, true, false])?;
    frame.set_support("N3", [true, true, false])?;
    frame.add_load("N2", [0.0, -1000.0, 0.0])?;
    Ok(frame)
}

pub fn display_frame_result(result: &FrameResult) {
    println!("{}Node displacements", COMMENT);
    for node in &result.nodes {
        println!(
            "Node {} displacements: {:e}, {:e}, {:e}",
            node.name, node.displacement[0], node.displacement[1], node.displacement[2]
        );
    }
    println!("{}Support reactions", COMMENT);
    for node in result.nodes.iter().filter(|n| n.reaction.iter().any(|r| *r != 0.0)) {
        println!(
            "Node {} reactions: {:.3}, {:.3}, {:.3}",
            node.name, node.reaction[0], node.reaction[1], node.reaction[2]
        );
    }
    println!("{}Member forces", COMMENT);
    for member in &result.members {
        println!("Member {} axial force: {:.3}", member.name, member.axial_force);
    }
}
