//! Default configuration values for the A20 board family
//!
//! These are the fixed constants the provisioning pipeline was written
//! against. A profile TOML can override the paths and the settle delay;
//! the markers are contracts with specific tool versions and are not
//! configurable.

/// Addressing unit for all offset/size arithmetic, in bytes
pub const SECTOR_SIZE_BYTES: u64 = 512;

/// Boot partition start offset, in sectors
pub const BOOT_PARTITION_OFFSET: u64 = 2048;

/// Boot partition size, in sectors (32 MiB worth of 512-byte sectors)
pub const BOOT_PARTITION_SIZE: u64 = 32768 * 2;

/// Raw NAND device node exposed by the kernel driver
pub const NAND_DEVICE: &str = "/dev/nand";

/// Boot partition node (FAT16)
pub const BOOT_DEVICE: &str = "/dev/nanda";

/// Root partition node (ext4)
pub const ROOT_DEVICE: &str = "/dev/nandb";

/// Removable source medium carrying the prebuilt distribution
pub const SOURCE_DEVICE: &str = "/dev/mmcblk0p1";

/// Mount point for the boot partition
pub const BOOT_MOUNT: &str = "/media/boot";

/// Mount point for the root partition
pub const ROOT_MOUNT: &str = "/media/rootfs";

/// Mount point for the source medium
pub const SOURCE_MOUNT: &str = "/mnt";

/// Bootloader image, expected in the working directory
pub const BOOTLOADER_IMAGE: &str = "nand.mbr.img";

/// Boot file set archive, expected in the working directory
pub const BOOT_ARCHIVE: &str = "boot-files.tar";

/// Kernel image under the source medium's boot directory
pub const KERNEL_IMAGE: &str = "uImage";

/// Board binary blob under the source medium's boot directory
pub const BOARD_BLOB: &str = "script.bin";

/// Flash controller identifier passed to nand-part
pub const FLASH_CONTROLLER: &str = "a20";

/// Delay before feeding the confirmation keystroke to nand-part, in ms
pub const SETTLE_DELAY_MS: u64 = 200;

/// Marker emitted by nand-part when the kernel accepted the new table
pub const MARKER_PARTITION_OK: &str = "rereading partition table... returned 0";

/// Marker in the dd transfer summary
pub const MARKER_BOOTLOADER_OK: &str = "copied";

/// Marker emitted by mkfs.msdos when it falls back to default geometry
pub const MARKER_FAT_OK: &str = "using default";

/// Marker emitted by mkfs.ext4 after writing superblocks
pub const MARKER_EXT4_OK: &str = "done";

/// Marker proving mkfs.msdos is the dosfstools build
pub const MARKER_FAT_TOOL: &str = "mkfs.fat";

/// Marker in fdisk's usage text
pub const MARKER_FDISK_TOOL: &str = "fdisk [options]";

/// Text immediately preceding the total sector count in `fdisk -l`
pub const SECTOR_COUNT_PREFIX: &str = ", total ";

/// Text immediately following the total sector count in `fdisk -l`
pub const SECTOR_COUNT_SUFFIX: &str = " sectors";
