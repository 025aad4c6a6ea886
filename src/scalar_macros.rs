macro_rules! float_scalar {
    ($type:ident) => {
        impl Scalar for $type {
            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $type
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn floor(self) -> Self {
                num_traits::Float::floor(self)
            }

            #[inline]
            fn powi(self, n: i32) -> Self {
                num_traits::Float::powi(self, n)
            }
        }
    };
}
