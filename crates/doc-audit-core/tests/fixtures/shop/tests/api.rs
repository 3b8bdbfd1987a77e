pub trait Client {
    fn call(&self);
}
