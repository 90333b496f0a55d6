//! Recorded raw dumps, used by tests and handy as `--load` input
//!
//! Both are in the same text format `RawCpuData::serialize` writes.

/// Intel Core i7-12700K (Alder Lake-S, family 6 model 0x97)
pub const ALDER_LAKE_I7_12700K: &str = "\
version=0.3.0
basic_cpuid[0]=00000020 756e6547 6c65746e 49656e69
basic_cpuid[1]=00090672 00800800 7ffafbff bfebfbff
basic_cpuid[2]=00feff01 000000f0 00000000 00000000
basic_cpuid[3]=00000000 00000000 00000000 00000000
basic_cpuid[4]=fc004121 02c0003f 0000003f 00000000
basic_cpuid[5]=00000040 00000040 00000003 10102020
basic_cpuid[6]=00dfcff7 00000002 00000401 00000003
basic_cpuid[7]=00000002 239c27eb 98c027bc fc1cc410
basic_cpuid[8]=00000000 00000000 00000000 00000000
basic_cpuid[9]=00000000 00000000 00000000 00000000
basic_cpuid[10]=07300605 00000000 00000007 00008603
basic_cpuid[11]=00000001 00000002 00000100 00000000
basic_cpuid[12]=00000000 00000000 00000000 00000000
basic_cpuid[13]=00000207 00000a88 00000a88 00000000
basic_cpuid[14]=00000000 00000000 00000000 00000000
basic_cpuid[15]=00000000 00000000 00000000 00000000
basic_cpuid[16]=00000000 00000000 00000000 00000000
basic_cpuid[17]=00000000 00000000 00000000 00000000
basic_cpuid[18]=00000000 00000000 00000000 00000000
basic_cpuid[19]=00000000 00000000 00000000 00000000
basic_cpuid[20]=00000001 0000005f 00000007 00000000
basic_cpuid[21]=00000002 000000bc 0249f000 00000000
basic_cpuid[22]=00000e10 00001388 00000064 00000000
basic_cpuid[23]=00000000 00000000 00000000 00000000
basic_cpuid[24]=00000008 00000000 00000000 00000000
basic_cpuid[25]=00000007 00000014 00000003 00000000
basic_cpuid[26]=40000001 00000000 00000000 00000000
basic_cpuid[27]=00000001 00000001 00000000 00000000
basic_cpuid[28]=4000000b 00000007 00000007 00000000
basic_cpuid[29]=00000000 00000000 00000000 00000000
basic_cpuid[30]=00000000 00000000 00000000 00000000
basic_cpuid[31]=00000001 00000002 00000100 00000000
ext_cpuid[0]=80000008 00000000 00000000 00000000
ext_cpuid[1]=00000000 00000000 00000121 2c100800
ext_cpuid[2]=68743231 6e654720 746e4920 52286c65
ext_cpuid[3]=6f432029 54286572 6920294d 32312d37
ext_cpuid[4]=4b303037 00000000 00000000 00000000
ext_cpuid[5]=00000000 00000000 00000000 00000000
ext_cpuid[6]=00000000 00000000 05007040 00000000
ext_cpuid[7]=00000000 00000000 00000000 00000100
ext_cpuid[8]=0000302e 00000000 00000000 00000000
ext_cpuid[9]=00000000 00000000 00000000 00000000
ext_cpuid[10]=00000000 00000000 00000000 00000000
ext_cpuid[11]=00000000 00000000 00000000 00000000
ext_cpuid[12]=00000000 00000000 00000000 00000000
ext_cpuid[13]=00000000 00000000 00000000 00000000
ext_cpuid[14]=00000000 00000000 00000000 00000000
ext_cpuid[15]=00000000 00000000 00000000 00000000
ext_cpuid[16]=00000000 00000000 00000000 00000000
ext_cpuid[17]=00000000 00000000 00000000 00000000
ext_cpuid[18]=00000000 00000000 00000000 00000000
ext_cpuid[19]=00000000 00000000 00000000 00000000
ext_cpuid[20]=00000000 00000000 00000000 00000000
ext_cpuid[21]=00000000 00000000 00000000 00000000
ext_cpuid[22]=00000000 00000000 00000000 00000000
ext_cpuid[23]=00000000 00000000 00000000 00000000
ext_cpuid[24]=00000000 00000000 00000000 00000000
ext_cpuid[25]=00000000 00000000 00000000 00000000
ext_cpuid[26]=00000000 00000000 00000000 00000000
ext_cpuid[27]=00000000 00000000 00000000 00000000
ext_cpuid[28]=00000000 00000000 00000000 00000000
ext_cpuid[29]=00000000 00000000 00000000 00000000
ext_cpuid[30]=00000000 00000000 00000000 00000000
ext_cpuid[31]=00000000 00000000 00000000 00000000
intel_fn4[0]=fc004121 02c0003f 0000003f 00000000
intel_fn4[1]=fc004122 01c0003f 0000003f 00000000
intel_fn4[2]=fc01c143 0240003f 000007ff 00000000
intel_fn4[3]=fc1fc163 0240003f 00009fff 00000004
intel_fn4[4]=00000000 00000000 00000000 00000000
intel_fn4[5]=00000000 00000000 00000000 00000000
intel_fn4[6]=00000000 00000000 00000000 00000000
intel_fn4[7]=00000000 00000000 00000000 00000000
intel_fn11[0]=00000001 00000002 00000100 00000000
intel_fn11[1]=00000007 00000014 00000201 00000000
intel_fn11[2]=00000000 00000000 00000000 00000000
intel_fn11[3]=00000000 00000000 00000000 00000000
amd_fn8000001dh[0]=00000000 00000000 00000000 00000000
amd_fn8000001dh[1]=00000000 00000000 00000000 00000000
amd_fn8000001dh[2]=00000000 00000000 00000000 00000000
amd_fn8000001dh[3]=00000000 00000000 00000000 00000000
amd_fn8000001dh[4]=00000000 00000000 00000000 00000000
amd_fn8000001dh[5]=00000000 00000000 00000000 00000000
amd_fn8000001dh[6]=00000000 00000000 00000000 00000000
amd_fn8000001dh[7]=00000000 00000000 00000000 00000000
";

/// AMD Ryzen 9 5900X (Vermeer, family 0x19 model 0x21)
pub const VERMEER_RYZEN_9_5900X: &str = "\
version=0.3.0
basic_cpuid[0]=00000010 68747541 444d4163 69746e65
basic_cpuid[1]=00a20f10 00180800 7ed8320b 178bfbff
basic_cpuid[2]=00000000 00000000 00000000 00000000
basic_cpuid[3]=00000000 00000000 00000000 00000000
basic_cpuid[4]=00000000 00000000 00000000 00000000
basic_cpuid[5]=00000000 00000000 00000000 00000000
basic_cpuid[6]=00000000 00000000 00000000 00000000
basic_cpuid[7]=00000000 219c97a9 0040068c 00000010
basic_cpuid[8]=00000000 00000000 00000000 00000000
basic_cpuid[9]=00000000 00000000 00000000 00000000
basic_cpuid[10]=00000000 00000000 00000000 00000000
basic_cpuid[11]=00000000 00000000 00000000 00000000
basic_cpuid[12]=00000000 00000000 00000000 00000000
basic_cpuid[13]=00000207 00000340 00000380 00000000
basic_cpuid[14]=00000000 00000000 00000000 00000000
basic_cpuid[15]=00000000 00000000 00000000 00000000
basic_cpuid[16]=00000000 00000000 00000000 00000000
basic_cpuid[17]=00000000 00000000 00000000 00000000
basic_cpuid[18]=00000000 00000000 00000000 00000000
basic_cpuid[19]=00000000 00000000 00000000 00000000
basic_cpuid[20]=00000000 00000000 00000000 00000000
basic_cpuid[21]=00000000 00000000 00000000 00000000
basic_cpuid[22]=00000000 00000000 00000000 00000000
basic_cpuid[23]=00000000 00000000 00000000 00000000
basic_cpuid[24]=00000000 00000000 00000000 00000000
basic_cpuid[25]=00000000 00000000 00000000 00000000
basic_cpuid[26]=00000000 00000000 00000000 00000000
basic_cpuid[27]=00000000 00000000 00000000 00000000
basic_cpuid[28]=00000000 00000000 00000000 00000000
basic_cpuid[29]=00000000 00000000 00000000 00000000
basic_cpuid[30]=00000000 00000000 00000000 00000000
basic_cpuid[31]=00000000 00000000 00000000 00000000
ext_cpuid[0]=80000020 68747541 444d4163 69746e65
ext_cpuid[1]=00a20f10 20000000 75c237ff 2fd3fbff
ext_cpuid[2]=20444d41 657a7952 2039206e 30303935
ext_cpuid[3]=32312058 726f432d 72502065 7365636f
ext_cpuid[4]=00726f73 00000000 00000000 00000000
ext_cpuid[5]=ff40ff40 ff40ff40 20080140 20080140
ext_cpuid[6]=48002200 68004200 02006140 02008140
ext_cpuid[7]=00000000 0000003b 00000000 00006799
ext_cpuid[8]=00003030 111ef657 00007017 00010000
ext_cpuid[9]=00000000 00000000 00000000 00000000
ext_cpuid[10]=00000000 00000000 00000000 00000000
ext_cpuid[11]=00000000 00000000 00000000 00000000
ext_cpuid[12]=00000000 00000000 00000000 00000000
ext_cpuid[13]=00000000 00000000 00000000 00000000
ext_cpuid[14]=00000000 00000000 00000000 00000000
ext_cpuid[15]=00000000 00000000 00000000 00000000
ext_cpuid[16]=00000000 00000000 00000000 00000000
ext_cpuid[17]=00000000 00000000 00000000 00000000
ext_cpuid[18]=00000000 00000000 00000000 00000000
ext_cpuid[19]=00000000 00000000 00000000 00000000
ext_cpuid[20]=00000000 00000000 00000000 00000000
ext_cpuid[21]=00000000 00000000 00000000 00000000
ext_cpuid[22]=00000000 00000000 00000000 00000000
ext_cpuid[23]=00000000 00000000 00000000 00000000
ext_cpuid[24]=00000000 00000000 00000000 00000000
ext_cpuid[25]=00000000 00000000 00000000 00000000
ext_cpuid[26]=00000000 00000000 00000000 00000000
ext_cpuid[27]=00000000 00000000 00000000 00000000
ext_cpuid[28]=00000000 00000000 00000000 00000000
ext_cpuid[29]=00004121 01c0003f 0000003f 00000000
ext_cpuid[30]=00000000 00000100 00000000 00000000
ext_cpuid[31]=00000000 00000000 00000000 00000000
intel_fn4[0]=00000000 00000000 00000000 00000000
intel_fn4[1]=00000000 00000000 00000000 00000000
intel_fn4[2]=00000000 00000000 00000000 00000000
intel_fn4[3]=00000000 00000000 00000000 00000000
intel_fn4[4]=00000000 00000000 00000000 00000000
intel_fn4[5]=00000000 00000000 00000000 00000000
intel_fn4[6]=00000000 00000000 00000000 00000000
intel_fn4[7]=00000000 00000000 00000000 00000000
intel_fn11[0]=00000000 00000000 00000000 00000000
intel_fn11[1]=00000000 00000000 00000000 00000000
intel_fn11[2]=00000000 00000000 00000000 00000000
intel_fn11[3]=00000000 00000000 00000000 00000000
amd_fn8000001dh[0]=00004121 01c0003f 0000003f 00000000
amd_fn8000001dh[1]=00004122 01c0003f 0000003f 00000000
amd_fn8000001dh[2]=00004143 01c0003f 000003ff 00000002
amd_fn8000001dh[3]=0002c163 03c0003f 00007fff 00000001
amd_fn8000001dh[4]=00000000 00000000 00000000 00000000
amd_fn8000001dh[5]=00000000 00000000 00000000 00000000
amd_fn8000001dh[6]=00000000 00000000 00000000 00000000
amd_fn8000001dh[7]=00000000 00000000 00000000 00000000
";
