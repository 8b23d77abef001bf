use crate::core::dec::{ Decoder, Read };


/// One level of nesting held on a decoder.
///
/// Dropping the guard steps back out, on the error path too.
pub(crate) struct DepthGuard<'a, R: Read>(&'a mut Decoder<R>);

impl<'a, R: Read> DepthGuard<'a, R> {
    /// Returns `None` when the reader refuses to nest any deeper.
    #[inline]
    pub(crate) fn enter(decoder: &'a mut Decoder<R>) -> Option<DepthGuard<'a, R>> {
        if decoder.get_mut().step_in() {
            Some(DepthGuard(decoder))
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self) -> &mut Decoder<R> {
        &mut *self.0
    }
}

impl<R: Read> Drop for DepthGuard<'_, R> {
    fn drop(&mut self) {
        self.0.get_mut().step_out();
    }
}
