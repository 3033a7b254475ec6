/// Result of a rewriting step: `Yes` carries a new value, `No` hands back the
/// input untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed<T> {
    Yes(T),
    No(T),
}

impl<T> Transformed<T> {
    pub fn is_yes(&self) -> bool {
        matches!(self, Transformed::Yes(_))
    }

    pub fn get_plan(self) -> T {
        match self {
            Transformed::Yes(plan) | Transformed::No(plan) => plan,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Transformed<U> {
        match self {
            Transformed::Yes(plan) => Transformed::Yes(f(plan)),
            Transformed::No(plan) => Transformed::No(f(plan)),
        }
    }
}
