/// Caps how many budgeted messages may go out in one tick
pub struct SendBudget {
    cap: usize,
    used: usize,
}

impl SendBudget {
    pub fn new(cap: usize) -> Self {
        Self { cap, used: 0 }
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }

    /// Takes one send from the budget. Returns false once the cap is reached.
    pub fn try_consume(&mut self) -> bool {
        if self.used >= self.cap {
            return false;
        }
        self.used += 1;
        true
    }

    pub fn used(&self) -> usize {
        self.used
    }

    #[cfg(test)]
    pub fn remaining(&self) -> usize {
        self.cap.saturating_sub(self.used)
    }

    #[cfg(test)]
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.cap
    }
}
