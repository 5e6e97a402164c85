/// A `for` loop over `start..end` that can be used in `const fn`.
#[macro_export]
macro_rules! iter_const {
    ( for $t:ident in $start:expr ,.. $end:expr => $bl:block ) => {{
        let mut $t = $start;
        if $start < $end {
            loop {
                $bl;

                $t += 1;
                if $t >= $end {
                    break;
                }
            }
        }
    }};
}
