use crate::error::MinigradError;
use crate::tensor::{NodeId, Tensor};
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Builds a topological ordering of the graph reachable from `root`.
///
/// Inputs appear before the nodes computed from them, so walking the result in
/// reverse visits every node after all of its consumers. Only nodes that
/// require gradients are visited; untracked inputs are not part of the
/// differentiable graph.
///
/// The traversal is an iterative post-order DFS keyed on node identity, so deep
/// chains (long training graphs) do not grow the call stack.
pub(crate) fn topological_sort(root: &Tensor) -> Vec<Tensor> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut sorted = Vec::new();
    let mut stack: Vec<(Tensor, bool)> = vec![(root.clone(), false)];

    while let Some((node, inputs_done)) = stack.pop() {
        if inputs_done {
            sorted.push(node);
            continue;
        }
        if !visited.insert(node.node_id()) {
            continue;
        }
        let grad_fn = node.grad_fn();
        stack.push((node, true));
        if let Some(op) = grad_fn {
            for input in op.inputs() {
                if input.requires_grad() && !visited.contains(&input.node_id()) {
                    stack.push((input, false));
                }
            }
        }
    }
    sorted
}

/// Propagates `seed` from `root` to every tracked leaf reachable from it.
///
/// Gradients flowing into the same node from several consumers are summed
/// before that node's backward rule runs. Leaves add the total into their
/// `grad` storage; intermediate nodes do not retain anything.
///
/// Callers are expected to run this with graph recording disabled.
pub(crate) fn run_backward(root: &Tensor, seed: Tensor) -> Result<(), MinigradError> {
    let sorted = topological_sort(root);
    debug!("Backward pass over {} node(s)", sorted.len());

    let mut pending: HashMap<NodeId, Tensor> = HashMap::new();
    pending.insert(root.node_id(), seed);

    for node in sorted.iter().rev() {
        let grad = match pending.remove(&node.node_id()) {
            Some(grad) => grad,
            None => continue,
        };

        let op = match node.grad_fn() {
            Some(op) => op,
            None => {
                if node.requires_grad() {
                    node.acc_grad(&grad)?;
                }
                continue;
            }
        };

        let inputs = op.inputs();
        let input_grads = op.backward(&grad)?;
        if input_grads.len() != inputs.len() {
            return Err(MinigradError::InternalError(format!(
                "{} returned {} gradient(s) for {} input(s)",
                op.name(),
                input_grads.len(),
                inputs.len()
            )));
        }

        for (input, input_grad) in inputs.iter().zip(input_grads) {
            if !input.requires_grad() {
                continue;
            }
            if input_grad.shape() != input.shape() {
                return Err(MinigradError::GradientAccumulationShapeMismatch {
                    expected: input.shape(),
                    actual: input_grad.shape(),
                });
            }
            match pending.entry(input.node_id()) {
                Entry::Occupied(mut slot) => {
                    let summed = sum_gradients(slot.get(), &input_grad)?;
                    slot.insert(summed);
                }
                Entry::Vacant(slot) => {
                    slot.insert(input_grad);
                }
            }
        }
    }
    Ok(())
}

fn sum_gradients(a: &Tensor, b: &Tensor) -> Result<Tensor, MinigradError> {
    let buffer = a.buffer_arc().add(&b.buffer_arc())?;
    Tensor::from_buffer(buffer, a.shape())
}
