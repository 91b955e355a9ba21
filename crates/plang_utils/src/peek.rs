pub trait Peek: Iterator {
    fn peek(&self) -> Option<Self::Item>;

    fn eat<P>(&mut self, pat: P) -> bool
    where
        Self::Item: PartialEq<P>,
    {
        match self.peek() {
            Some(item) if item == pat => {
                self.next();
                true
            }
            _ => false,
        }
    }

    fn eat_while(&mut self, mut f: impl FnMut(&Self::Item) -> bool) -> usize {
        let mut count = 0;
        while matches!(self.peek(), Some(item) if f(&item)) {
            self.next();
            count += 1;
        }
        count
    }

    fn at_end(&self) -> bool {
        self.peek().is_none()
    }
}

impl<P: Peek> Peek for &mut P {
    fn peek(&self) -> Option<Self::Item> {
        (**self).peek()
    }
}

impl Peek for std::str::Chars<'_> {
    fn peek(&self) -> Option<Self::Item> {
        self.clone().next()
    }
}
