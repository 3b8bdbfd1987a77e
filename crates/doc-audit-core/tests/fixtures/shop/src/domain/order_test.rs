pub trait Fixture {
    fn build(&self);
}

pub struct Sample {
    pub value: u64,
}
