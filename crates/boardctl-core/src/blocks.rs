//! Pure mutations over the local task-block collection. Callers persist
//! the full snapshot and mirror it after every successful mutation.

use anyhow::{anyhow, bail};

use crate::model::TaskBlock;

pub fn create_block(blocks: &mut Vec<TaskBlock>, title: String) {
    blocks.push(TaskBlock::new(title));
}

pub fn add_task(blocks: &mut [TaskBlock], block_index: usize, name: String) -> anyhow::Result<()> {
    let block = block_mut(blocks, block_index)?;
    block.tasks.push(name);
    Ok(())
}

/// Removes the task at a position inside a block. Identity is positional:
/// the remaining tasks shift down, nothing else changes.
pub fn remove_task(
    blocks: &mut [TaskBlock],
    block_index: usize,
    task_index: usize,
) -> anyhow::Result<String> {
    let block = block_mut(blocks, block_index)?;
    if task_index >= block.tasks.len() {
        bail!(
            "no task {} in block \"{}\" ({} task(s))",
            task_index + 1,
            block.title,
            block.tasks.len()
        );
    }
    Ok(block.tasks.remove(task_index))
}

pub fn remove_block(blocks: &mut Vec<TaskBlock>, block_index: usize) -> anyhow::Result<TaskBlock> {
    if block_index >= blocks.len() {
        bail!("no block {} ({} block(s))", block_index + 1, blocks.len());
    }
    Ok(blocks.remove(block_index))
}

fn block_mut(blocks: &mut [TaskBlock], block_index: usize) -> anyhow::Result<&mut TaskBlock> {
    let count = blocks.len();
    blocks
        .get_mut(block_index)
        .ok_or_else(|| anyhow!("no block {} ({count} block(s))", block_index + 1))
}
