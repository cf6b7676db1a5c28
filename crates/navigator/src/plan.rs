//! The agent's committed queue of pending actions.
use std::collections::VecDeque;

use crate::action::Action;
use crate::geometry::Heading;

/// Which kind of commitment the agent is currently following.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    Idle,
    FollowingExploration,
    FollowingGoal,
}

/// Pending actions, tagged by what produced them.
///
/// A drained plan always collapses back to [`Plan::Idle`], so a non-idle plan
/// is never empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Plan {
    #[default]
    Idle,
    Exploring(VecDeque<Action>),
    SeekingGoal(VecDeque<Action>),
}

impl Plan {
    /// Exploration plan walking `moves`; idle when there are none.
    pub fn exploring<I>(moves: I) -> Self
    where
        I: IntoIterator<Item = Heading>,
    {
        let queue: VecDeque<Action> = moves.into_iter().map(Action::Move).collect();
        if queue.is_empty() {
            Plan::Idle
        } else {
            Plan::Exploring(queue)
        }
    }

    /// Straight walk toward a finish marker seen `depth` cells out along
    /// `heading`, ending with `use`. No obstacle check happens here.
    pub fn toward_finish(heading: Heading, depth: usize) -> Self {
        let steps = depth + 1;
        let mut queue: VecDeque<Action> =
            std::iter::repeat_n(Action::Move(heading), steps).collect();
        queue.push_back(Action::Use);
        Plan::SeekingGoal(queue)
    }

    pub fn mode(&self) -> Mode {
        match self {
            Plan::Idle => Mode::Idle,
            Plan::Exploring(_) => Mode::FollowingExploration,
            Plan::SeekingGoal(_) => Mode::FollowingGoal,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Plan::Idle)
    }

    pub fn len(&self) -> usize {
        self.queue().map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remaining actions, front first.
    pub fn pending(&self) -> impl Iterator<Item = Action> + '_ {
        self.queue().into_iter().flatten().copied()
    }

    /// Takes the next action, returning to idle once the queue drains.
    pub fn pop(&mut self) -> Option<Action> {
        let queue = match self {
            Plan::Idle => return None,
            Plan::Exploring(queue) | Plan::SeekingGoal(queue) => queue,
        };
        let action = queue.pop_front();
        if queue.is_empty() {
            *self = Plan::Idle;
        }
        action
    }

    fn queue(&self) -> Option<&VecDeque<Action>> {
        match self {
            Plan::Idle => None,
            Plan::Exploring(queue) | Plan::SeekingGoal(queue) => Some(queue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_exploration_is_idle() {
        assert_eq!(Plan::exploring(Vec::<Heading>::new()), Plan::Idle);
        assert_eq!(Plan::Idle.len(), 0);
        assert_eq!(Plan::Idle.mode(), Mode::Idle);
    }

    #[test]
    fn pop_drains_to_idle() {
        let mut plan = Plan::exploring([Heading::North, Heading::East]);
        assert_eq!(plan.mode(), Mode::FollowingExploration);
        assert_eq!(plan.pop(), Some(Action::Move(Heading::North)));
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.pop(), Some(Action::Move(Heading::East)));
        assert!(plan.is_idle());
        assert_eq!(plan.pop(), None);
    }

    #[test]
    fn cardinal_goal_plan_walks_then_uses() {
        let plan = Plan::toward_finish(Heading::South, 3);
        assert_eq!(plan.mode(), Mode::FollowingGoal);
        let actions: Vec<_> = plan.pending().collect();
        let mut expected = vec![Action::Move(Heading::South); 4];
        expected.push(Action::Use);
        assert_eq!(actions, expected);
    }

    #[test]
    fn adjacent_finish_is_one_step_away() {
        let actions: Vec<_> = Plan::toward_finish(Heading::West, 0).pending().collect();
        assert_eq!(actions, vec![Action::Move(Heading::West), Action::Use]);
    }
}
