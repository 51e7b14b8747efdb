/*!
```console
     _        _     _                         _
 ___| |_ _ __(_) __| | ___ _ __   ___   ___ | |
/ __| __| '__| |/ _` |/ _ \ '_ \ / _ \ / _ \| |
\__ \ |_| |  | | (_| |  __/ |_) | (_) | (_) | |
|___/\__|_|  |_|\__,_|\___| .__/ \___/ \___/|_|
                          |_|
```

2D max/avg pooling over zero-copy strided window views.
*/

mod core;
pub use crate::core::{
    config::{PaddingScope, PoolConfig, PoolMode},
    errors::{ConfigError, PoolError},
    ops::pool::pool2d,
    view::{Window, WindowView},
    Tensor,
};
