// Little endian field access over packed on-disk structures

pub(crate) trait Little: Sized {
    fn read_le(bytes: &[u8], offset: usize) -> Self;
    fn write_le(self, bytes: &mut [u8], offset: usize);
}

macro_rules! define {
    ($type:ty) => {
        impl Little for $type {
            #[inline]
            fn read_le(bytes: &[u8], offset: usize) -> $type {
                let size = core::mem::size_of::<$type>();
                let mut array = [0u8; core::mem::size_of::<$type>()];
                array.copy_from_slice(&bytes[offset..offset + size]);
                <$type>::from_le_bytes(array)
            }

            #[inline]
            fn write_le(self, bytes: &mut [u8], offset: usize) {
                let array = <$type>::to_le_bytes(self);
                bytes[offset..offset + array.len()].copy_from_slice(&array);
            }
        }
    };
}

define!(u8);
define!(u16);
define!(u32);

#[inline]
pub(crate) fn read<T: Little>(bytes: &[u8], offset: usize) -> T {
    T::read_le(bytes, offset)
}

#[inline]
pub(crate) fn write<T: Little>(bytes: &mut [u8], offset: usize, value: T) {
    value.write_le(bytes, offset)
}

#[inline]
pub(crate) fn array<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut array = [0u8; N];
    array.copy_from_slice(&bytes[offset..offset + N]);
    array
}
